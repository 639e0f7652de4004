//! Global hotkeys.
//!
//! Suppressing bindings (paste popup) are registered with the OS through
//! `global-hotkey`, which swallows the combo before it reaches the focused
//! application. Bindings that must pass through (copy) are watched by
//! polling key state instead. Both are owned by [`HotkeyEventLoop`], which
//! runs on the main thread.

mod combo;
mod dispatcher;
mod event_loop;
mod passive;
mod worker;

pub use combo::parse_combo;
pub use dispatcher::GlobalHotkeyDispatcher;
pub use event_loop::{HotkeyEventLoop, HotkeyLoopEvent, LoopHotkeys};
