//! QuickClip: clipboard history with a paste popup.
//!
//! This crate wires the layered workspace crates into a runnable service:
//! `bootstrap` loads config and logging and assembles adapters, `runtime`
//! owns the poll task and hotkeys, `adapters` holds the presentation stand-in.

pub mod adapters;
pub mod bootstrap;
pub mod runtime;

pub use runtime::{AppRuntime, AppRuntimeHandle, AppRuntimeParts};
