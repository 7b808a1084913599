//! Values computed from other fields once extraction is finished.

use super::structure::Configuration;


pub const RGSS_VERSION_RANGE: (i32, i32) = (0, 3);
pub const SOUND_EFFECT_SOURCE_RANGE: (i32, i32) = (1, 64);


/// Default game screen size for an RGSS version: RGSS1 games run at 640x480,
/// later versions at 544x416.
pub fn default_screen_size(rgss_version: i32) -> (i32, i32) {
    if rgss_version == 1 {
        (640, 480)
    } else {
        (544, 416)
    }
}


/// Fills in derived values and clamps ranged fields, in that order.
pub fn apply_derived_values(configuration: &mut Configuration) {
    let (default_width, default_height) = default_screen_size(configuration.rgss_version);
    let display = &mut configuration.display;

    if display.default_screen_width <= 0 {
        display.default_screen_width = default_width;
    }

    if display.default_screen_height <= 0 {
        display.default_screen_height = default_height;
    }


    configuration.rgss_version = configuration
        .rgss_version
        .clamp(RGSS_VERSION_RANGE.0, RGSS_VERSION_RANGE.1);

    configuration.audio.sound_effect_source_count = configuration
        .audio
        .sound_effect_source_count
        .clamp(SOUND_EFFECT_SOURCE_RANGE.0, SOUND_EFFECT_SOURCE_RANGE.1);
}
