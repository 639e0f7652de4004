pub mod model;

pub use model::{Settings, Theme};
