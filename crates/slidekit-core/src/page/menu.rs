use tracing::debug;

/// Collapsible navigation menu for narrow layouts.
///
/// While open, the page behind it must not scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle button pressed; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        debug!(open = self.open, "Menu toggled");
        self.open
    }

    /// A link inside the menu was followed. Closes the menu if it is open.
    pub fn link_activated(&mut self) {
        if self.open {
            self.open = false;
            debug!("Menu closed after navigation");
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value for the toggle button's `aria-expanded` attribute
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Whether body scrolling should be locked
    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.aria_expanded(), "false");

        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert!(menu.scroll_locked());

        assert!(!menu.toggle());
        assert!(!menu.scroll_locked());
    }

    #[test]
    fn test_link_closes_open_menu_only() {
        let mut menu = MobileMenu::new();
        menu.link_activated();
        assert!(!menu.is_open());

        menu.toggle();
        menu.link_activated();
        assert!(!menu.is_open());
        assert_eq!(menu.aria_expanded(), "false");
    }
}
