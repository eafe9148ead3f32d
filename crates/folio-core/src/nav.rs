//! Mobile navigation menu state.

/// ARIA label of the hamburger while the menu is open.
pub const CLOSE_MENU_LABEL: &str = "Close navigation menu";

/// ARIA label of the hamburger while the menu is closed.
pub const OPEN_MENU_LABEL: &str = "Open navigation menu";

/// Open/closed state of the collapsible navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// A closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger clicked. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Value for `aria-expanded`.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Value for the hamburger's `aria-label`.
    pub fn aria_label(&self) -> &'static str {
        if self.open {
            CLOSE_MENU_LABEL
        } else {
            OPEN_MENU_LABEL
        }
    }

    /// Inline `overflow` for `<body>`; the page must not scroll behind an
    /// open menu.
    pub fn body_overflow(&self) -> &'static str {
        if self.open { "hidden" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_aria_state() {
        let mut menu = NavMenu::new();
        assert_eq!(menu.aria_label(), OPEN_MENU_LABEL);

        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.aria_label(), CLOSE_MENU_LABEL);
        assert_eq!(menu.body_overflow(), "hidden");

        assert!(!menu.toggle());
        assert_eq!(menu.aria_expanded(), "false");
        assert_eq!(menu.body_overflow(), "");
    }

    #[test]
    fn close_reports_whether_anything_changed() {
        let mut menu = NavMenu::new();
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }
}
