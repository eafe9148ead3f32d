//! Frame coalescing.
//!
//! Scroll events arrive far more often than the display refreshes. A
//! [`FrameCoalescer`] keeps a pending flag so a burst of triggers schedules a
//! single frame, and the recomputation runs once when that frame fires.

use std::cell::Cell;

/// Collapses repeated triggers into at most one recomputation per frame.
///
/// ```
/// use folio_core::FrameCoalescer;
///
/// let coalescer = FrameCoalescer::new();
/// let mut scheduled = 0;
/// for _ in 0..5 {
///     if coalescer.request() {
///         scheduled += 1;
///     }
/// }
/// assert_eq!(scheduled, 1);
///
/// let mut runs = 0;
/// coalescer.run_frame(|| runs += 1);
/// assert_eq!(runs, 1);
/// assert!(coalescer.request());
/// ```
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Cell<bool>,
}

impl FrameCoalescer {
    /// Create a coalescer with no frame pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger.
    ///
    /// Returns `true` when the caller must schedule a frame, `false` when one
    /// is already pending.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Whether a frame is scheduled but has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Run the recomputation for the scheduled frame and clear the flag.
    pub fn run_frame<F: FnOnce()>(&self, recompute: F) {
        recompute();
        self.pending.set(false);
    }

    /// Drop a scheduled frame that will never run.
    pub fn reset(&self) {
        self.pending.set(false);
    }
}
