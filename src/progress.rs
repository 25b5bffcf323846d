// src/progress.rs
/// Lightweight progress reporting for pipeline runs.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once per stage as it starts.
    fn stage(&mut self, _name: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
