//! State derived from the vertical scroll offset.
//!
//! Three independent reactors recompute on every coalesced scroll frame:
//! the navbar `scrolled` style, the scroll-to-top button visibility (both a
//! [`ThresholdToggle`]) and the active navigation link ([`active_section`]).

/// Offset past which the navbar switches to its scrolled style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Offset past which the scroll-to-top button is shown.
pub const SCROLL_TOP_THRESHOLD: f64 = 400.0;

/// Extra look-ahead below the navbar when picking the active section.
pub const ACTIVE_SECTION_LOOKAHEAD: f64 = 100.0;

/// A strict "offset above threshold" predicate with change detection.
///
/// The same threshold applies in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdToggle {
    threshold: f64,
    active: Option<bool>,
}

impl ThresholdToggle {
    /// Toggle that turns on once the offset exceeds `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            active: None,
        }
    }

    /// Navbar style toggle.
    pub fn navbar() -> Self {
        Self::new(NAVBAR_SCROLL_THRESHOLD)
    }

    /// Scroll-to-top visibility toggle.
    pub fn scroll_top() -> Self {
        Self::new(SCROLL_TOP_THRESHOLD)
    }

    /// Recompute for `offset`; returns the new state.
    pub fn update(&mut self, offset: f64) -> bool {
        let active = offset > self.threshold;
        self.active = Some(active);
        active
    }

    /// Recompute for `offset`; returns the new state only if it changed.
    ///
    /// The first update always reports.
    pub fn update_changed(&mut self, offset: f64) -> Option<bool> {
        let previous = self.active;
        let active = self.update(offset);
        (previous != Some(active)).then_some(active)
    }

    /// Last computed state, `false` before the first update.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

/// Layout of one labelled page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    /// Section id, matched against `#id` link targets.
    pub id: String,
    /// Distance from the document top in pixels.
    pub top: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl SectionBounds {
    /// Build bounds for section `id`.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `position` falls in `[top, top + height)`.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Id of the section the reader is currently in.
///
/// The lookahead point sits `navbar_height + 100px` below the scroll offset; the
/// last section containing it wins.
pub fn active_section<'a, I>(sections: I, scroll_offset: f64, navbar_height: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a SectionBounds>,
{
    let point = scroll_offset + navbar_height + ACTIVE_SECTION_LOOKAHEAD;
    sections
        .into_iter()
        .filter(|section| section.contains(point))
        .last()
        .map(|section| section.id.as_str())
}

/// Whether a navigation link `href` points at section `active`.
pub fn link_is_active(href: Option<&str>, active: Option<&str>) -> bool {
    match (href, active) {
        (Some(href), Some(id)) => href.strip_prefix('#') == Some(id),
        _ => false,
    }
}
