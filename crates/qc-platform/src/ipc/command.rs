/// Requests sent to the runtime from any thread or task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    ShowPopup,
    HidePopup,
    /// Hide the popup, then put `text` on the clipboard and paste it into
    /// the previously focused application.
    Paste { text: String },
    ToggleTheme,
    Shutdown,
}
