//! Time-boxed smooth scrolling.
//!
//! A [`ScrollAnimator`] hands out [`ScrollRun`]s. Each run remembers the
//! generation it was started in; starting a new run (or cancelling) bumps the
//! generation so frames still queued for an older run see they are stale and
//! stop without touching the scroll position.

use std::cell::Cell;

use crate::easing::ease_in_out_cubic;

/// Duration of the animation triggered by in-page anchor links.
pub const ANCHOR_SCROLL_MS: f64 = 800.0;

/// Duration of the animation triggered by the scroll-to-top button.
pub const TOP_SCROLL_MS: f64 = 600.0;

/// Hands out scroll runs and tracks which one is current.
#[derive(Debug, Default)]
pub struct ScrollAnimator {
    generation: Cell<u64>,
}

impl ScrollAnimator {
    /// Create an animator with no run in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run from `start` to `target`, superseding any earlier run.
    pub fn begin(&self, start: f64, target: f64, duration_ms: f64) -> ScrollRun {
        let token = self.generation.get().wrapping_add(1);
        self.generation.set(token);
        ScrollRun {
            token,
            start,
            target,
            duration_ms: duration_ms.max(0.0),
            started_at: None,
        }
    }

    /// Whether `run` is still the most recent run.
    pub fn is_current(&self, run: &ScrollRun) -> bool {
        run.token == self.generation.get()
    }

    /// Invalidate the run in flight, if any.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Advance `run` to the frame timestamp `now`.
    ///
    /// Returns `None` when the run has been superseded or cancelled.
    pub fn step(&self, run: &mut ScrollRun, now: f64) -> Option<ScrollFrame> {
        if !self.is_current(run) {
            return None;
        }
        Some(run.sample(now))
    }
}

/// One scroll animation from a start offset to a target offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRun {
    token: u64,
    start: f64,
    target: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

/// Scroll offset to apply for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Vertical offset to scroll to.
    pub offset: f64,
    /// No further frames are needed after this one.
    pub finished: bool,
}

impl ScrollRun {
    /// Offset the run starts from.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Offset the run ends on.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Sample the run at frame timestamp `now`.
    ///
    /// The first sampled timestamp is elapsed zero.
    pub fn sample(&mut self, now: f64) -> ScrollFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);
        ScrollFrame {
            offset: self.offset_at(elapsed),
            finished: elapsed >= self.duration_ms,
        }
    }

    /// Offset after `elapsed_ms` milliseconds.
    pub fn offset_at(&self, elapsed_ms: f64) -> f64 {
        if elapsed_ms >= self.duration_ms {
            return self.target;
        }
        let progress = (elapsed_ms / self.duration_ms).min(1.0);
        self.start + (self.target - self.start) * ease_in_out_cubic(progress)
    }
}

/// Section id an in-page link should animate to.
///
/// Empty hrefs, a bare `#` and `#home` keep the browser default.
pub fn anchor_id(href: &str) -> Option<&str> {
    match href {
        "" | "#" | "#home" => None,
        _ => href.strip_prefix('#').filter(|id| !id.is_empty()),
    }
}

/// Scroll offset that puts a section just below the fixed navbar.
pub fn anchor_offset(section_top: f64, navbar_height: f64) -> f64 {
    section_top - navbar_height
}
