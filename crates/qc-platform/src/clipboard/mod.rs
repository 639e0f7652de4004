mod local;
pub mod watcher;

pub use local::LocalClipboard;
pub use watcher::ClipboardWatcher;
