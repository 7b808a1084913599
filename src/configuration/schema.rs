//! The schema defaults store.
//!
//! [`SCHEMA`] is the single table of every recognised key: where it lives in
//! the document, its compiled-in default (whose kind is the only kind merge will
//! accept for that key), when it is extracted, and which [`Configuration`]
//! field receives it. The defaults document and the initial configuration are
//! both generated from it, so a key cannot exist in one without the other.

use serde_json::{Map, Value};

use super::document::ConfigDocument;
use super::structure::Configuration;


/// Name of the nested object holding the eight input binding names.
pub const BINDING_NAMES_OBJECT: &str = "bindingNames";


/// When a field is pulled out of the working document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    /// Right after the bundled document, before the game folder is entered.
    Early,
    /// After the user document has been merged.
    Late,
}

/// Platform condition a field's extraction depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGate {
    Always,
    NativeRenderer,
}


#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    String(&'static str),
    StringList(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Boolean(value) => Value::Bool(value),
            DefaultValue::Integer(value) => Value::from(value),
            DefaultValue::String(value) => Value::from(value),
            DefaultValue::StringList(values) => {
                Value::Array(values.iter().map(|value| Value::from(*value)).collect())
            }
        }
    }
}


/// Destination of a field inside [`Configuration`], tagged with the native type
/// extraction converts to.
#[derive(Clone, Copy)]
pub enum FieldTarget {
    Boolean(fn(&mut Configuration) -> &mut bool),
    /// Accepts booleans and numbers (non-zero is `true`).
    BooleanLike(fn(&mut Configuration) -> &mut bool),
    Integer(fn(&mut Configuration) -> &mut i32),
    String(fn(&mut Configuration) -> &mut String),
    StringList(fn(&mut Configuration) -> &mut Vec<String>),
}


#[derive(Clone, Copy)]
pub struct SchemaField {
    /// Nested object the key lives in, `None` for top-level keys.
    pub object: Option<&'static str>,
    pub key: &'static str,
    pub default: DefaultValue,
    pub stage: ExtractionStage,
    pub gate: FieldGate,
    pub target: FieldTarget,
}

impl SchemaField {
    /// Dotted name used in log messages.
    pub fn display_name(&self) -> String {
        match self.object {
            Some(object) => format!("{}.{}", object, self.key),
            None => self.key.to_string(),
        }
    }
}


use self::ExtractionStage::{Early, Late};

const fn field(
    key: &'static str,
    default: DefaultValue,
    stage: ExtractionStage,
    target: FieldTarget,
) -> SchemaField {
    SchemaField {
        object: None,
        key,
        default,
        stage,
        gate: FieldGate::Always,
        target,
    }
}

const fn boolean(
    key: &'static str,
    default: bool,
    stage: ExtractionStage,
    target: fn(&mut Configuration) -> &mut bool,
) -> SchemaField {
    field(key, DefaultValue::Boolean(default), stage, FieldTarget::Boolean(target))
}

const fn integer(
    key: &'static str,
    default: i64,
    stage: ExtractionStage,
    target: fn(&mut Configuration) -> &mut i32,
) -> SchemaField {
    field(key, DefaultValue::Integer(default), stage, FieldTarget::Integer(target))
}

const fn string(
    key: &'static str,
    default: &'static str,
    stage: ExtractionStage,
    target: fn(&mut Configuration) -> &mut String,
) -> SchemaField {
    field(key, DefaultValue::String(default), stage, FieldTarget::String(target))
}

const fn string_list(
    key: &'static str,
    default: &'static [&'static str],
    target: fn(&mut Configuration) -> &mut Vec<String>,
) -> SchemaField {
    field(key, DefaultValue::StringList(default), Late, FieldTarget::StringList(target))
}

const fn binding_name(
    key: &'static str,
    default: &'static str,
    target: fn(&mut Configuration) -> &mut String,
) -> SchemaField {
    SchemaField {
        object: Some(BINDING_NAMES_OBJECT),
        ..string(key, default, Late, target)
    }
}


const PREFER_METAL_RENDERER_DEFAULT: bool = cfg!(all(target_os = "macos", target_arch = "aarch64"));
const ENABLE_BLITTING_DEFAULT: bool = !cfg!(windows);


/// Every key the cascade recognises, in document order.
pub static SCHEMA: &[SchemaField] = &[
    integer("rgssVersion", 1, Early, |c| &mut c.rgss_version),
    boolean("debugMode", false, Late, |c| &mut c.debug_mode),
    boolean("printFPS", false, Late, |c| &mut c.display.print_fps),
    boolean("winResizable", false, Late, |c| &mut c.display.window_resizable),
    boolean("fullscreen", false, Late, |c| &mut c.display.fullscreen),
    boolean("fixedAspectRatio", true, Late, |c| &mut c.display.fixed_aspect_ratio),
    boolean("smoothScaling", false, Late, |c| &mut c.display.smooth_scaling),
    boolean("vsync", false, Late, |c| &mut c.display.vsync),
    integer("defScreenW", 0, Early, |c| &mut c.display.default_screen_width),
    integer("defScreenH", 0, Early, |c| &mut c.display.default_screen_height),
    string("windowTitle", "", Late, |c| &mut c.display.window_title),
    integer("fixedFramerate", 0, Late, |c| &mut c.display.fixed_framerate),
    boolean("frameSkip", false, Late, |c| &mut c.display.frame_skip),
    boolean("syncToRefreshrate", false, Late, |c| &mut c.display.sync_to_refresh_rate),
    boolean("solidFonts", false, Late, |c| &mut c.display.solid_fonts),
    SchemaField {
        gate: FieldGate::NativeRenderer,
        ..boolean(
            "preferMetalRenderer",
            PREFER_METAL_RENDERER_DEFAULT,
            Late,
            |c| &mut c.display.prefer_metal_renderer,
        )
    },
    boolean("subImageFix", false, Late, |c| &mut c.display.sub_image_fix),
    boolean("enableBlitting", ENABLE_BLITTING_DEFAULT, Late, |c| &mut c.display.enable_blitting),
    boolean("integerScalingActive", false, Late, |c| &mut c.display.integer_scaling.active),
    boolean("integerScalingLastMile", true, Late, |c| {
        &mut c.display.integer_scaling.last_mile_scaling
    }),
    integer("maxTextureSize", 0, Late, |c| &mut c.display.max_texture_size),
    string("gameFolder", ".", Early, |c| &mut c.paths.game_folder),
    boolean("anyAltToggleFS", false, Late, |c| &mut c.display.any_alt_toggle_fullscreen),
    boolean("enableReset", false, Late, |c| &mut c.display.enable_reset),
    boolean("enableSettings", true, Late, |c| &mut c.display.enable_settings),
    boolean("allowSymlinks", false, Early, |c| &mut c.paths.allow_symlinks),
    string("dataPathOrg", "", Early, |c| &mut c.paths.data_path_org),
    string("dataPathApp", "Oneshot", Early, |c| &mut c.paths.data_path_app),
    string("iconPath", "", Early, |c| &mut c.paths.icon_path),
    string("execName", "modshot", Early, |c| &mut c.paths.exec_name),
    string("midiSoundFont", "", Late, |c| &mut c.audio.midi.sound_font),
    boolean("midiChorus", false, Late, |c| &mut c.audio.midi.chorus),
    boolean("midiReverb", false, Late, |c| &mut c.audio.midi.reverb),
    integer("SESourceCount", 6, Late, |c| &mut c.audio.sound_effect_source_count),
    string("customScript", "", Late, |c| &mut c.scripting.custom_script),
    boolean("pathCache", true, Early, |c| &mut c.paths.path_cache),
    field(
        "useScriptNames",
        DefaultValue::Integer(1),
        Late,
        FieldTarget::BooleanLike(|c| &mut c.scripting.use_script_names),
    ),
    string_list("preloadScript", &[], |c| &mut c.scripting.preload_scripts),
    string_list("RTP", &[], |c| &mut c.paths.rtps),
    string_list("fontSub", &[], |c| &mut c.display.font_substitutions),
    string_list("scriptLoadpath", &["rubygems"], |c| &mut c.scripting.script_load_paths),
    boolean("JITEnable", false, Early, |c| &mut c.scripting.jit.enabled),
    integer("JITVerboseLevel", 0, Early, |c| &mut c.scripting.jit.verbose_level),
    integer("JITMaxCache", 100, Early, |c| &mut c.scripting.jit.max_cache),
    integer("JITMinCalls", 10000, Early, |c| &mut c.scripting.jit.min_calls),
    binding_name("action", "Action", |c| &mut c.bindings.action),
    binding_name("cancel", "Cancel", |c| &mut c.bindings.cancel),
    binding_name("menu", "Menu", |c| &mut c.bindings.menu),
    binding_name("items", "Items", |c| &mut c.bindings.items),
    binding_name("run", "Run", |c| &mut c.bindings.run),
    binding_name("deactivate", "Deactivate", |c| &mut c.bindings.deactivate),
    binding_name("l", "L", |c| &mut c.bindings.l),
    binding_name("r", "R", |c| &mut c.bindings.r),
];


/// Builds the canonical defaults document from [`SCHEMA`].
pub fn defaults_document() -> ConfigDocument {
    let mut document = ConfigDocument::new();

    for schema_field in SCHEMA {
        let container = match schema_field.object {
            Some(object_name) => {
                let nested = document
                    .entry(object_name)
                    .or_insert_with(|| Value::Object(Map::new()));

                match nested {
                    Value::Object(nested_object) => nested_object,
                    _ => continue,
                }
            }
            None => &mut document,
        };

        container.insert(schema_field.key.to_string(), schema_field.default.to_value());
    }

    document
}

/// Names of the nested objects the schema declares (e.g. `bindingNames`).
pub fn nested_object_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();

    for object_name in SCHEMA.iter().filter_map(|schema_field| schema_field.object) {
        if !names.contains(&object_name) {
            names.push(object_name);
        }
    }

    names
}
