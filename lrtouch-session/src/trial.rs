use lrtouch_core::{Layout, Trial};

/// The trial currently on screen
#[derive(Debug, Clone)]
pub struct Presentation<T> {
    /// 0-based position in the session order
    pub index: usize,
    pub trial: Trial,
    pub layout: Layout,
    /// Monotonic time the trial became visible
    pub started_at: T,
}
