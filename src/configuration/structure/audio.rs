use serde::Serialize;


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct MidiConfiguration {
    pub sound_font: String,

    pub chorus: bool,

    pub reverb: bool,
}


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct AudioConfiguration {
    pub midi: MidiConfiguration,

    /// Number of sound effect sources, clamped to `1..=64`.
    pub sound_effect_source_count: i32,
}
