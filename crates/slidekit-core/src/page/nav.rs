use tracing::debug;

/// A page section that has an entry in the navigation bar
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    /// Offset from the top of the document
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Highlights the navigation link of the section being read.
///
/// A section is current when `scroll_y` lies in `(top - offset, top - offset
/// + height]`. When several match, the last one in document order wins; when
/// none match, the previous highlight is kept.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    sections: Vec<Section>,
    offset: f64,
    active: Option<String>,
}

impl ActiveSectionTracker {
    pub fn new(sections: Vec<Section>, offset: f64) -> Self {
        Self {
            sections,
            offset,
            active: None,
        }
    }

    /// Recompute the active section; returns it
    pub fn update(&mut self, scroll_y: f64) -> Option<&str> {
        let current = self
            .sections
            .iter()
            .rev()
            .find(|s| {
                let start = s.top - self.offset;
                scroll_y > start && scroll_y <= start + s.height
            })
            .map(|s| s.id.clone());

        if current.is_some() && current != self.active {
            debug!(section = ?current, scroll_y, "Active section changed");
            self.active = current;
        }
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether the link with `href` should carry the active style
    pub fn is_link_active(&self, href: &str) -> bool {
        match (&self.active, href.strip_prefix('#')) {
            (Some(active), Some(id)) => active == id,
            _ => false,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ActiveSectionTracker {
        ActiveSectionTracker::new(
            vec![
                Section::new("home", 0.0, 600.0),
                Section::new("projects", 600.0, 800.0),
                Section::new("contact", 1400.0, 400.0),
            ],
            100.0,
        )
    }

    #[test]
    fn test_update_picks_section() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(10.0), Some("home"));
        assert_eq!(tracker.update(550.0), Some("projects"));
        assert!(tracker.is_link_active("#projects"));
        assert!(!tracker.is_link_active("#home"));
    }

    #[test]
    fn test_boundary_belongs_to_earlier_section() {
        let mut tracker = tracker();
        // 500 is the end of home's range and the exclusive start of projects'
        assert_eq!(tracker.update(500.0), Some("home"));
        assert_eq!(tracker.update(500.5), Some("projects"));
    }

    #[test]
    fn test_no_match_keeps_previous() {
        let mut tracker = tracker();
        tracker.update(1500.0);
        assert_eq!(tracker.update(5000.0), Some("contact"));
        assert_eq!(tracker.active(), Some("contact"));
    }

    #[test]
    fn test_nothing_active_initially() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(-200.0), None);
        assert!(!tracker.is_link_active("#home"));
    }
}
