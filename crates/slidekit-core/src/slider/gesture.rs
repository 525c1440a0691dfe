//! L4 Atomic Layer: Drag/swipe gesture tracking
//!
//! A gesture only produces visual offsets while it is active. Whether it
//! commits a navigation is decided once, when it ends.

/// State of an in-progress pointer or touch gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    origin_x: f64,
    current_x: f64,
    /// Track offset (percent) when the gesture started
    baseline_offset: f64,
    /// Autoplay was running and got suspended by this gesture
    pub(crate) suspended_autoplay: bool,
}

impl DragGesture {
    pub fn new(origin_x: f64, baseline_offset: f64) -> Self {
        Self {
            origin_x,
            current_x: origin_x,
            baseline_offset,
            suspended_autoplay: false,
        }
    }

    /// Record the latest pointer position
    #[inline]
    pub fn move_to(&mut self, x: f64) {
        self.current_x = x;
    }

    /// Net pointer displacement since the gesture started (positive = rightward)
    #[inline]
    pub fn displacement(&self) -> f64 {
        self.current_x - self.origin_x
    }

    /// Track offset to display while dragging
    ///
    /// One slide width equals `reference_width / page_size` pixels, so the
    /// pixel delta is converted into percent of a slide.
    pub fn visual_offset(&self, reference_width: f64, page_size: usize) -> f64 {
        self.baseline_offset + drag_offset_percent(self.displacement(), reference_width, page_size)
    }
}

/// Pixel delta expressed as percent of one slide width
#[inline]
pub fn drag_offset_percent(delta: f64, reference_width: f64, page_size: usize) -> f64 {
    let slide_width = reference_width / page_size.max(1) as f64;
    if slide_width <= 0.0 || !slide_width.is_finite() {
        return 0.0;
    }
    delta / slide_width * 100.0
}

/// What a finished gesture asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Dragged toward later content
    Next,
    /// Dragged toward earlier content
    Prev,
    /// Below threshold, return to the current position
    SnapBack,
}

/// Decide the outcome of a gesture from its net displacement
///
/// Positive displacement (rightward) reveals earlier content.
pub fn resolve(displacement: f64, threshold: f64) -> GestureOutcome {
    if displacement.abs() > threshold {
        if displacement > 0.0 {
            GestureOutcome::Prev
        } else {
            GestureOutcome::Next
        }
    } else {
        GestureOutcome::SnapBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direction_is_inverted() {
        assert_eq!(resolve(150.0, 100.0), GestureOutcome::Prev);
        assert_eq!(resolve(-150.0, 100.0), GestureOutcome::Next);
    }

    #[test]
    fn test_resolve_at_threshold_snaps_back() {
        assert_eq!(resolve(100.0, 100.0), GestureOutcome::SnapBack);
        assert_eq!(resolve(-20.0, 100.0), GestureOutcome::SnapBack);
        assert_eq!(resolve(0.0, 0.0), GestureOutcome::SnapBack);
    }

    #[test]
    fn test_visual_offset() {
        let mut gesture = DragGesture::new(500.0, -100.0);
        // 1200px viewport, 3 per page: one slide is 400px
        gesture.move_to(300.0);
        assert!((gesture.visual_offset(1200.0, 3) - (-150.0)).abs() < 1e-9);
        assert!((gesture.displacement() + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_gives_no_offset() {
        assert_eq!(drag_offset_percent(50.0, 0.0, 2), 0.0);
    }
}
