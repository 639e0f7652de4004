use anyhow::Result;

/// Synthesizes the platform paste keystroke into whichever application has
/// focus. Blocking; callers run it off the async executor.
pub trait PasteInjectorPort: Send + Sync {
    fn inject_paste(&self) -> Result<()>;
}
