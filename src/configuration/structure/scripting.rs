use serde::Serialize;


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct JitConfiguration {
    pub enabled: bool,

    pub verbose_level: i32,

    pub max_cache: i32,

    pub min_calls: i32,
}


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ScriptingConfiguration {
    pub custom_script: String,

    pub use_script_names: bool,

    pub preload_scripts: Vec<String>,

    pub script_load_paths: Vec<String>,

    pub jit: JitConfiguration,
}
