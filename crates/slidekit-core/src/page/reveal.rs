use std::collections::HashSet;
use std::hash::Hash;

/// Vertical extent of an element in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Reveal-on-scroll tracking.
///
/// An element is revealed once at least `threshold` of its height intersects
/// the viewport shrunk by `bottom_margin`. Revealed elements stay revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    threshold: f64,
    bottom_margin: f64,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            bottom_margin: bottom_margin.max(0.0),
            revealed: HashSet::new(),
        }
    }

    /// Check an element against the viewport; returns whether it is revealed
    pub fn observe(&mut self, key: &K, bounds: Bounds, viewport_height: f64) -> bool {
        if self.revealed.contains(key) {
            return true;
        }

        if intersection_ratio(bounds, viewport_height - self.bottom_margin) >= self.threshold
            && intersects(bounds, viewport_height - self.bottom_margin)
        {
            self.revealed.insert(key.clone());
            return true;
        }
        false
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new(0.1, 50.0)
    }
}

fn intersects(bounds: Bounds, visible_bottom: f64) -> bool {
    bounds.top < visible_bottom && bounds.top + bounds.height > 0.0
}

/// Share of the element's height inside `[0, visible_bottom]`
fn intersection_ratio(bounds: Bounds, visible_bottom: f64) -> f64 {
    if bounds.height <= 0.0 {
        return if intersects(bounds, visible_bottom) { 1.0 } else { 0.0 };
    }
    let top = bounds.top.max(0.0);
    let bottom = (bounds.top + bounds.height).min(visible_bottom);
    ((bottom - top).max(0.0) / bounds.height).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_needs_threshold() {
        let mut tracker = RevealTracker::default();
        // 100px element, viewport 800 minus 50px margin
        assert!(!tracker.observe(&"card", Bounds::new(745.0, 100.0), 800.0));
        assert!(tracker.observe(&"card", Bounds::new(740.0, 100.0), 800.0));
    }

    #[test]
    fn test_revealed_elements_stay_revealed() {
        let mut tracker = RevealTracker::default();
        assert!(tracker.observe(&1, Bounds::new(100.0, 200.0), 800.0));
        assert!(tracker.observe(&1, Bounds::new(2000.0, 200.0), 800.0));
        assert!(tracker.is_revealed(&1));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_element_above_viewport() {
        let mut tracker = RevealTracker::default();
        assert!(!tracker.observe(&"hero", Bounds::new(-500.0, 200.0), 800.0));
    }
}
