use tracing::debug;

/// Resolves in-page anchor links to scroll targets, leaving room for the
/// fixed header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorScroller {
    header_offset: f64,
}

impl AnchorScroller {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    /// Scroll position for `href`, or `None` when the link should keep its
    /// default behaviour.
    ///
    /// Only fragment links (`#id`) are handled; a bare `#` or an id that
    /// `lookup` cannot find yields `None`. `lookup` returns the element's top
    /// relative to the current viewport.
    pub fn target<F>(&self, href: &str, scroll_y: f64, lookup: F) -> Option<f64>
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let Some(top) = lookup(id) else {
            debug!(href, "Anchor target not found");
            return None;
        };
        Some((top + scroll_y - self.header_offset).max(0.0))
    }
}

impl Default for AnchorScroller {
    fn default() -> Self {
        Self::new(80.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_subtracts_header() {
        let scroller = AnchorScroller::default();
        let target = scroller.target("#projects", 200.0, |id| {
            assert_eq!(id, "projects");
            Some(500.0)
        });
        assert_eq!(target, Some(620.0));
    }

    #[test]
    fn test_target_is_clamped_at_top() {
        let scroller = AnchorScroller::new(80.0);
        assert_eq!(scroller.target("#hero", 0.0, |_| Some(20.0)), Some(0.0));
    }

    #[test]
    fn test_non_fragment_links_are_ignored() {
        let scroller = AnchorScroller::default();
        assert_eq!(scroller.target("#", 0.0, |_| Some(10.0)), None);
        assert_eq!(scroller.target("/about", 0.0, |_| Some(10.0)), None);
        assert_eq!(scroller.target("#missing", 0.0, |_| None), None);
    }
}
