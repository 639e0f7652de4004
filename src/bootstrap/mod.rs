pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use run::run_app;
pub use wiring::{wire_runtime, PlatformWiring, WiringError};
