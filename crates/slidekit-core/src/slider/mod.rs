//! Headless slider/carousel engine
//!
//! One controller type drives every slider on the site: the paged projects
//! slider, the single-item testimonials carousel and the category-filtered
//! projects slider with autoplay. They differ only in [`SliderConfig`].
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `pagination` - Page/index arithmetic, offsets and dots
//! - `policy` - Wrap-around stepping
//! - `gesture` - Drag tracking and commit decision
//! - `options` - Configuration types and derived values (re-exported from config)
//! - `catalog` - Slides and category grouping
//!
//! ## L3 Molecular Layer
//! - `controller` - State machine combining the atoms
//!
//! Hosts plug in through the traits in `ports`.
//!
//! # Usage
//!
//! ```ignore
//! use slidekit_core::scheduler::ManualScheduler;
//! use slidekit_core::slider::{FixedViewport, RecordingView, Slide, SliderConfig, SliderController};
//!
//! let slides = (0..7).map(Slide::new).collect();
//! let mut slider = SliderController::new(
//!     slides,
//!     SliderConfig::projects(),
//!     RecordingView::new(),
//!     FixedViewport::new(1280.0),
//!     ManualScheduler::new(),
//! );
//!
//! slider.go_to_page(2);
//! assert_eq!(slider.current_index(), 4);
//! ```

// L4 Atomic Layer
pub mod catalog;
pub mod gesture;
pub mod options;
pub mod pagination;
pub mod policy;

// L3 Molecular Layer
pub mod controller;

pub mod input;
pub mod ports;

// Re-exports for convenient access
pub use catalog::{CategoryGrouping, Slide};
pub use controller::{SliderController, SliderState};
pub use gesture::{DragGesture, GestureOutcome};
pub use input::{NavKey, SliderInput};
pub use options::{
    Breakpoints, DragReference, DragThreshold, Granularity, PageSize, SliderConfig,
    SliderConfigExt,
};
pub use policy::Direction;
pub use ports::{Dot, FixedViewport, RecordingView, SliderFrame, SliderView, Viewport};
