use std::cell::Cell;
use std::rc::Rc;

use slidekit_core::slider::{Dot, SliderFrame, SliderView, Viewport};

/// Keeps the latest frame and pagination so widgets can draw them on the
/// next terminal draw
#[derive(Debug, Clone)]
pub struct TerminalView {
    frame: SliderFrame,
    dots: Vec<Dot>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            frame: SliderFrame::empty(),
            dots: Vec::new(),
        }
    }

    pub fn frame(&self) -> &SliderFrame {
        &self.frame
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderView for TerminalView {
    fn render(&mut self, frame: &SliderFrame) {
        self.frame = frame.clone();
    }

    fn rebuild_pagination(&mut self, dots: &[Dot]) {
        self.dots = dots.to_vec();
    }
}

/// Terminal width in pixels, shared by every slider of one App.
///
/// The terminal is mapped onto pixel breakpoints by assuming a fixed width
/// per column.
#[derive(Debug, Clone)]
pub struct TerminalViewport {
    width_px: Rc<Cell<f64>>,
}

impl TerminalViewport {
    pub fn new(width_px: Rc<Cell<f64>>) -> Self {
        Self { width_px }
    }
}

impl Viewport for TerminalViewport {
    fn viewport_width(&self) -> f64 {
        self.width_px.get()
    }
}

/// Convert a column count to pixels
#[inline]
pub fn columns_to_px(columns: u16, cell_width_px: f64) -> f64 {
    f64::from(columns) * cell_width_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_follows_shared_width() {
        let width = Rc::new(Cell::new(800.0));
        let viewport = TerminalViewport::new(Rc::clone(&width));
        assert_eq!(viewport.viewport_width(), 800.0);

        width.set(columns_to_px(160, 8.0));
        assert_eq!(viewport.viewport_width(), 1280.0);
        assert_eq!(viewport.track_width(), 1280.0);
    }

    #[test]
    fn test_view_keeps_latest_output() {
        let mut view = TerminalView::new();
        view.rebuild_pagination(&[Dot {
            page: 0,
            label: "Go to slide 1".to_string(),
        }]);
        view.render(&SliderFrame {
            offset_percent: -50.0,
            active_page: Some(1),
            visible: vec![1],
            dragging: true,
        });

        assert_eq!(view.dots().len(), 1);
        assert_eq!(view.frame().active_page, Some(1));
        assert!(view.frame().dragging);
    }
}
