use serde::Serialize;


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    pub title: String,

    /// Script archive, relative to the game folder.
    pub scripts: String,
}

impl GameMetadata {
    /// The metadata of the only game this host runs.
    ///
    /// This stands in for the per-game `<execName>.ini` (`Game.Title`,
    /// `Game.Scripts`), which is never read. A reader for it would replace
    /// this constructor.
    pub fn builtin() -> Self {
        Self {
            title: "OneShot".to_string(),
            scripts: "Data/xScripts.rxdata".to_string(),
        }
    }
}
