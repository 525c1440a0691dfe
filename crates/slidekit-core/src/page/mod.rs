//! Page-level behaviours that surround the sliders: the mobile menu, anchor
//! scrolling, reveal-on-scroll and the active navigation highlight.

pub mod anchor;
pub mod menu;
pub mod nav;
pub mod reveal;

pub use anchor::AnchorScroller;
pub use menu::MobileMenu;
pub use nav::{ActiveSectionTracker, Section};
pub use reveal::{Bounds, RevealTracker};

use crate::config::PageConfig;

impl PageConfig {
    pub fn anchor_scroller(&self) -> AnchorScroller {
        AnchorScroller::new(self.header_offset_px)
    }

    pub fn section_tracker(&self, sections: Vec<Section>) -> ActiveSectionTracker {
        ActiveSectionTracker::new(sections, self.nav_offset_px)
    }

    pub fn reveal_tracker<K: Eq + std::hash::Hash + Clone>(&self) -> RevealTracker<K> {
        RevealTracker::new(self.reveal_threshold, self.reveal_bottom_margin_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_from_config() {
        let config = PageConfig::default();

        let scroller = config.anchor_scroller();
        assert_eq!(scroller.header_offset(), 80.0);

        let mut tracker = config.section_tracker(vec![Section::new("about", 1000.0, 500.0)]);
        assert_eq!(tracker.update(901.0), Some("about"));

        let mut reveal = config.reveal_tracker::<&str>();
        assert!(reveal.observe(&"intro", Bounds::new(0.0, 100.0), 800.0));
    }
}
