//! Environment variable and launch token overrides.

use std::collections::HashMap;

use super::structure::EditorFlags;
use super::traits::EnvironmentSource;


/// Launch token that enters debug mode and is removed from the pass-through list.
pub const DEBUG_TOKEN: &str = "debug";
/// Alternative debug token; unlike [`DEBUG_TOKEN`] it is passed through.
pub const TEST_TOKEN: &str = "test";
pub const BATTLE_TEST_TOKEN: &str = "btest";

pub const CONSOLE_VISIBLE_VARIABLE: &str = "MKXPZ_WINDOWS_CONSOLE";
pub const NATIVE_RENDERER_VARIABLE: &str = "MKXPZ_MACOS_METAL";
pub const FOLDER_SELECT_VARIABLE: &str = "MKXPZ_FOLDER_SELECT";
pub const BIG_PICTURE_VARIABLE: &str = "SteamTenfoot";


/// Reads the variables of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvironmentSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}


/// Reads `name` as a boolean.
///
/// Only the exact values `"0"` and `"1"` are recognised; an unset variable or
/// any other value yields `fallback`.
pub fn bool_from_env<E>(environment: &E, name: &str, fallback: bool) -> bool
where
    E: EnvironmentSource + ?Sized,
{
    match environment.var(name).as_deref() {
        Some("0") => false,
        Some("1") => true,
        _ => fallback,
    }
}


/// Launch mode and pass-through arguments derived from the process arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchTokens {
    pub editor: EditorFlags,

    pub arguments: Vec<String>,
}

/// Classifies the full argument vector (program name first).
///
/// The token after the program name selects the editor mode. Every token
/// except the literal [`DEBUG_TOKEN`] is kept, the program name included.
pub fn classify_launch_tokens<S>(tokens: &[S]) -> LaunchTokens
where
    S: AsRef<str>,
{
    let mut editor = EditorFlags::default();

    match tokens.get(1).map(AsRef::<str>::as_ref) {
        Some(DEBUG_TOKEN) | Some(TEST_TOKEN) => editor.debug = true,
        Some(BATTLE_TEST_TOKEN) => editor.battle_test = true,
        _ => {}
    }

    let arguments = tokens
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|token| *token != DEBUG_TOKEN)
        .map(str::to_string)
        .collect();

    LaunchTokens { editor, arguments }
}
