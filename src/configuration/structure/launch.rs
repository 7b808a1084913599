use serde::Serialize;


/// Modes requested by the editor through the first launch token.
#[derive(Serialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorFlags {
    pub debug: bool,

    pub battle_test: bool,
}


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfiguration {
    pub editor: EditorFlags,

    /// Launch tokens handed to scripts verbatim (every literal `debug` removed).
    pub arguments: Vec<String>,

    /// Whether a console window should be shown (`MKXPZ_WINDOWS_CONSOLE`).
    pub console_visible: bool,

    /// Whether the player may pick a game folder at startup (`MKXPZ_FOLDER_SELECT`).
    pub manual_folder_select: bool,
}
