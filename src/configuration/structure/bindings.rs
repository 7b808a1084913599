use serde::Serialize;


/// Display names of the input actions, as shown by the key binding screen.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    pub action: String,
    pub cancel: String,
    pub menu: String,
    pub items: String,
    pub run: String,
    pub deactivate: String,
    pub l: String,
    pub r: String,
}
