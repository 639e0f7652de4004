mod ui;

pub use ui::LoggingUi;
