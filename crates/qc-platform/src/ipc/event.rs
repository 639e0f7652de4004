// PlatformEvent describes facts that already happened. It never carries
// the next step to take; the runtime decides that.

use qc_core::ports::HotkeyAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A registered global hotkey was pressed.
    HotkeyPressed(HotkeyAction),

    /// The watcher inserted a new entry into the history.
    HistoryChanged,
}
