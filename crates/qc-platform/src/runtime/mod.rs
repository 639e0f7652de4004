pub mod event_bus;

pub use event_bus::{
    command_channel, event_channel, PlatformCommandReceiver, PlatformCommandSender,
    PlatformEventReceiver, PlatformEventSender,
};
