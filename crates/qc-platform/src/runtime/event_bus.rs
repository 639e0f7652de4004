use tokio::sync::mpsc;

use crate::ipc::{PlatformCommand, PlatformEvent};

pub type PlatformEventSender = mpsc::Sender<PlatformEvent>;
pub type PlatformEventReceiver = mpsc::Receiver<PlatformEvent>;

pub type PlatformCommandSender = mpsc::Sender<PlatformCommand>;
pub type PlatformCommandReceiver = mpsc::Receiver<PlatformCommand>;

/// Bounded so a stalled runtime applies back-pressure instead of growing
/// without limit. Hotkey forwarding drops events when full.
pub const EVENT_BUS_CAPACITY: usize = 64;

pub fn event_channel() -> (PlatformEventSender, PlatformEventReceiver) {
    mpsc::channel(EVENT_BUS_CAPACITY)
}

pub fn command_channel() -> (PlatformCommandSender, PlatformCommandReceiver) {
    mpsc::channel(EVENT_BUS_CAPACITY)
}
