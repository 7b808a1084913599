use serde::Serialize;


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct IntegerScalingConfiguration {
    pub active: bool,

    pub last_mile_scaling: bool,
}


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfiguration {
    pub print_fps: bool,

    pub window_resizable: bool,

    pub fullscreen: bool,

    pub fixed_aspect_ratio: bool,

    pub smooth_scaling: bool,

    pub vsync: bool,

    /// Game screen width. Derived from the RGSS version when not positive.
    pub default_screen_width: i32,

    /// Game screen height. Derived from the RGSS version when not positive.
    pub default_screen_height: i32,

    pub window_title: String,

    /// `0` means unlocked.
    pub fixed_framerate: i32,

    pub frame_skip: bool,

    pub sync_to_refresh_rate: bool,

    pub solid_fonts: bool,

    pub prefer_metal_renderer: bool,

    pub sub_image_fix: bool,

    pub enable_blitting: bool,

    pub integer_scaling: IntegerScalingConfiguration,

    /// `0` means the driver limit.
    pub max_texture_size: i32,

    pub any_alt_toggle_fullscreen: bool,

    pub enable_reset: bool,

    pub enable_settings: bool,

    /// Font substitution rules (`fontSub`).
    pub font_substitutions: Vec<String>,
}
