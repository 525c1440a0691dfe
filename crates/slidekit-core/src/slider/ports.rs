//! Capabilities a slider controller consumes from its host.
//!
//! The controller never touches a screen or a clock directly: it reads
//! geometry through [`Viewport`], pushes output through [`SliderView`] and
//! arms timers through [`Scheduler`](crate::scheduler::Scheduler).

use serde::Serialize;

pub use crate::scheduler::{AutoplayToken, Scheduler, TaskHandle};

/// Viewport and track geometry in pixels
pub trait Viewport {
    /// Width of the visible window
    fn viewport_width(&self) -> f64;

    /// Width of the slider track; defaults to the viewport width
    fn track_width(&self) -> f64 {
        self.viewport_width()
    }
}

/// Render target for a slider
pub trait SliderView {
    /// Apply a frame: track translation plus the active dot
    fn render(&mut self, frame: &SliderFrame);

    /// Replace the dot controls; dot `i` should invoke `go_to_page(i)`
    fn rebuild_pagination(&mut self, dots: &[Dot]);
}

/// Everything a view needs to draw the slider at one moment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderFrame {
    /// Track translation in percent (negative moves content left)
    pub offset_percent: f64,
    /// Highlighted page, `None` when there are no slides
    pub active_page: Option<usize>,
    /// Slide ids currently on screen
    pub visible: Vec<usize>,
    /// Frame comes from an in-progress gesture
    pub dragging: bool,
}

impl SliderFrame {
    /// Frame for an empty slider
    pub fn empty() -> Self {
        Self {
            offset_percent: 0.0,
            active_page: None,
            visible: Vec::new(),
            dragging: false,
        }
    }
}

/// A pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub page: usize,
    /// Accessible label, e.g. "Go to slide 2"
    pub label: String,
}

/// Viewport with fixed dimensions, adjustable by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub width: f64,
    pub track: Option<f64>,
}

impl FixedViewport {
    pub fn new(width: f64) -> Self {
        Self { width, track: None }
    }

    pub fn with_track(mut self, track: f64) -> Self {
        self.track = Some(track);
        self
    }
}

impl Viewport for FixedViewport {
    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn track_width(&self) -> f64 {
        self.track.unwrap_or(self.width)
    }
}

/// View that keeps every frame and pagination it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub frames: Vec<SliderFrame>,
    pub paginations: Vec<Vec<Dot>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&SliderFrame> {
        self.frames.last()
    }

    pub fn last_pagination(&self) -> Option<&[Dot]> {
        self.paginations.last().map(Vec::as_slice)
    }

    /// Forget recorded output
    pub fn clear(&mut self) {
        self.frames.clear();
        self.paginations.clear();
    }
}

impl SliderView for RecordingView {
    fn render(&mut self, frame: &SliderFrame) {
        self.frames.push(frame.clone());
    }

    fn rebuild_pagination(&mut self, dots: &[Dot]) {
        self.paginations.push(dots.to_vec());
    }
}
