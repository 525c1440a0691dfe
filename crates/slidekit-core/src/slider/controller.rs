//! L3 Molecular Layer: Slider controller
//!
//! Combines pagination math, the wrap policy, gesture tracking and autoplay
//! scheduling into one state machine. The three widget variants (projects,
//! testimonials, category projects) are configurations of this type.

use tracing::{debug, warn};

use super::catalog::{CategoryGrouping, Slide};
use super::gesture::{resolve, DragGesture, GestureOutcome};
use super::input::{NavKey, SliderInput};
use super::options::{DragReference, SliderConfig, SliderConfigExt};
use super::pagination::{
    base_index_for_page, build_dots, offset_percent, page_count, page_of_index, visible_range,
};
use super::policy::{step_page, Direction};
use super::ports::{Dot, SliderFrame, SliderView, Viewport};
use crate::scheduler::{AutoplayToken, Scheduler, TaskHandle};

/// Snapshot of the controller's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub total_slides: usize,
    pub page_size: usize,
    pub current_index: usize,
    /// Visual delta (percent) of the active gesture, 0 when idle
    pub drag_offset: f64,
}

/// Autoplay bookkeeping
struct Autoplay<H> {
    /// Autoplay should run whenever there is something to show
    enabled: bool,
    handle: Option<(AutoplayToken, H)>,
    generation: u64,
}

/// Slider controller
///
/// Owns the active slide sequence, the page size and the current index, and
/// reacts to navigation calls, gestures, resizes, category changes and
/// autoplay ticks. Output goes to the injected [`SliderView`]. No operation
/// fails: out-of-range input is clamped and out-of-sequence calls are no-ops.
pub struct SliderController<V, W, S>
where
    S: Scheduler,
{
    name: String,
    config: SliderConfig,
    /// Slide ids of the active sequence (whole deck or one category)
    slides: Vec<usize>,
    grouping: Option<CategoryGrouping>,
    active_category: Option<String>,
    page_size: usize,
    current_index: usize,
    gesture: Option<DragGesture>,
    /// Last visual offset produced by the active gesture
    drag_offset: f64,
    autoplay: Autoplay<S::Handle>,
    dots: Vec<Dot>,
    view: V,
    viewport: W,
    scheduler: S,
}

impl<V, W, S> SliderController<V, W, S>
where
    V: SliderView,
    W: Viewport,
    S: Scheduler,
{
    /// Create a controller, render the initial frame and start autoplay
    /// when configured
    pub fn new(slides: Vec<Slide>, config: SliderConfig, view: V, viewport: W, scheduler: S) -> Self {
        let page_size = config.resolve_page_size(viewport.viewport_width());
        let grouping = config
            .group_by_category
            .then(|| CategoryGrouping::from_slides(&slides));

        let mut controller = Self {
            name: "slider".to_string(),
            slides: slides.iter().map(|s| s.id).collect(),
            grouping,
            active_category: None,
            page_size,
            current_index: 0,
            gesture: None,
            drag_offset: 0.0,
            autoplay: Autoplay {
                enabled: config.autoplay_delay_ms.is_some(),
                handle: None,
                generation: 0,
            },
            dots: Vec::new(),
            view,
            viewport,
            scheduler,
            config,
        };

        if let Some(grouping) = &controller.grouping {
            let initial = controller
                .config
                .initial_category
                .as_deref()
                .filter(|c| grouping.contains(c))
                .or_else(|| grouping.first())
                .map(str::to_string);
            controller.slides = initial
                .as_deref()
                .and_then(|c| grouping.get(c))
                .map(<[usize]>::to_vec)
                .unwrap_or_default();
            controller.active_category = initial;
        }

        controller.rebuild_pagination();
        controller.render();
        controller.arm_autoplay();
        controller
    }

    /// Name used in log output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn state(&self) -> SliderState {
        SliderState {
            total_slides: self.slides.len(),
            page_size: self.page_size,
            current_index: self.current_index,
            drag_offset: if self.gesture.is_some() {
                self.drag_offset - offset_percent(self.current_index, self.page_size)
            } else {
                0.0
            },
        }
    }

    #[inline]
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn page_count(&self) -> usize {
        page_count(self.slides.len(), self.page_size, self.config.granularity)
    }

    /// Page the current index belongs to (0 when empty)
    pub fn current_page(&self) -> usize {
        page_of_index(
            self.current_index,
            self.slides.len(),
            self.page_size,
            self.config.granularity,
        )
    }

    /// Current pagination dots
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Slide ids of the active sequence
    pub fn slides(&self) -> &[usize] {
        &self.slides
    }

    /// Frame for the settled (non-dragging) position
    pub fn frame(&self) -> SliderFrame {
        if self.slides.is_empty() {
            return SliderFrame::empty();
        }
        let range = visible_range(self.current_index, self.slides.len(), self.page_size);
        SliderFrame {
            offset_percent: offset_percent(self.current_index, self.page_size),
            active_page: Some(self.current_page()),
            visible: self.slides[range].to_vec(),
            dragging: false,
        }
    }

    /// Offset currently on screen, including an active drag
    pub fn visual_offset(&self) -> f64 {
        if self.gesture.is_some() {
            self.drag_offset
        } else {
            offset_percent(self.current_index, self.page_size)
        }
    }

    /// Category names in display order (empty when not grouped)
    pub fn categories(&self) -> Vec<&str> {
        self.grouping
            .as_ref()
            .map(|g| g.categories().collect())
            .unwrap_or_default()
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    /// Category after the active one, wrapping around
    pub fn next_category(&self) -> Option<&str> {
        let grouping = self.grouping.as_ref()?;
        match self.active_category.as_deref() {
            Some(current) => grouping.after(current).or_else(|| grouping.first()),
            None => grouping.first(),
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// A timer is currently armed
    #[inline]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.handle.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn viewport(&self) -> &W {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut W {
        &mut self.viewport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Route an input event to the matching operation
    pub fn dispatch(&mut self, input: SliderInput) {
        match input {
            SliderInput::Next => self.next(),
            SliderInput::Prev => self.prev(),
            SliderInput::GoToPage(page) => self.go_to_page(page),
            SliderInput::PointerDown(x) => self.start_drag(x),
            SliderInput::PointerMove(x) => self.drag(x),
            SliderInput::PointerUp => self.end_drag(),
            SliderInput::PointerCancel => self.cancel_drag(),
            SliderInput::PointerEnter => self.pointer_enter(),
            SliderInput::PointerLeave => self.pointer_leave(),
            SliderInput::Resize => self.on_resize(),
            SliderInput::CategoryChanged(category) => self.on_category_change(&category),
            SliderInput::Key(key) => self.on_key(key),
            SliderInput::AutoplayTick(token) => {
                self.on_autoplay_tick(token);
            }
        }
    }

    /// Jump to a page (clamped to the valid range)
    pub fn go_to_page(&mut self, page: usize) {
        if self.slides.is_empty() {
            return;
        }
        self.show_page(page);
        self.restart_autoplay();
    }

    /// Advance one page, wrapping when looping is enabled
    pub fn next(&mut self) {
        if self.step(Direction::Forward) {
            self.restart_autoplay();
        }
    }

    /// Go back one page, wrapping when looping is enabled
    pub fn prev(&mut self) {
        if self.step(Direction::Backward) {
            self.restart_autoplay();
        }
    }

    /// Re-read the viewport and re-layout if the page size changed.
    ///
    /// A page size change resets to the first page.
    pub fn on_resize(&mut self) {
        let page_size = self
            .config
            .resolve_page_size(self.viewport.viewport_width());
        if page_size == self.page_size {
            return;
        }

        debug!(
            slider = %self.name,
            from = self.page_size,
            to = page_size,
            "Page size changed, resetting to first page"
        );
        self.page_size = page_size;
        self.current_index = 0;
        let resume = self.gesture.take().is_some_and(|g| g.suspended_autoplay);
        self.rebuild_pagination();
        self.render();
        if resume {
            self.arm_autoplay();
        }
    }

    /// Switch to another category's slides, starting from its first slide
    pub fn on_category_change(&mut self, category: &str) {
        let Some(grouping) = &self.grouping else {
            warn!(slider = %self.name, category, "Slider is not grouped by category");
            return;
        };

        self.slides = match grouping.get(category) {
            Some(ids) => ids.to_vec(),
            None => {
                warn!(slider = %self.name, category, "Unknown category, showing no slides");
                Vec::new()
            }
        };
        self.active_category = Some(category.to_string());
        self.current_index = 0;
        self.gesture = None;

        debug!(
            slider = %self.name,
            category,
            slides = self.slides.len(),
            "Category changed"
        );

        self.rebuild_pagination();
        self.render();
        self.restart_autoplay();
    }

    /// Begin a gesture at pointer position `x`
    pub fn start_drag(&mut self, x: f64) {
        if self.slides.is_empty() || self.gesture.is_some() {
            return;
        }

        let baseline = offset_percent(self.current_index, self.page_size);
        let mut gesture = DragGesture::new(x, baseline);
        if self.config.pause_on_drag && self.autoplay.handle.is_some() {
            self.disarm_autoplay();
            gesture.suspended_autoplay = true;
        }
        self.drag_offset = baseline;
        self.gesture = Some(gesture);
    }

    /// Follow the pointer; only the visual offset changes
    pub fn drag(&mut self, x: f64) {
        let reference = self.reference_width();
        let page_size = self.page_size;
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        gesture.move_to(x);
        self.drag_offset = gesture.visual_offset(reference, page_size);

        let mut frame = self.frame();
        frame.offset_percent = self.drag_offset;
        frame.dragging = true;
        self.view.render(&frame);
    }

    /// Finish a gesture: navigate if it went past the threshold, otherwise
    /// snap back. Gesture state is cleared either way.
    pub fn end_drag(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        let threshold = self.config.threshold_px(self.reference_width());
        let outcome = resolve(gesture.displacement(), threshold);
        debug!(
            slider = %self.name,
            displacement = gesture.displacement(),
            threshold,
            ?outcome,
            "Gesture ended"
        );

        match outcome {
            GestureOutcome::Next => self.next(),
            GestureOutcome::Prev => self.prev(),
            GestureOutcome::SnapBack => self.render(),
        }

        if gesture.suspended_autoplay && self.autoplay.handle.is_none() {
            self.arm_autoplay();
        }
    }

    /// Gesture interrupted (e.g. touch cancelled); handled like a normal end
    pub fn cancel_drag(&mut self) {
        self.end_drag();
    }

    /// Start autoplay, replacing any running timer
    pub fn start_autoplay(&mut self) {
        if self.config.autoplay_delay().is_none() {
            return;
        }
        self.autoplay.enabled = true;
        self.arm_autoplay();
    }

    /// Stop autoplay until it is started again
    pub fn stop_autoplay(&mut self) {
        self.autoplay.enabled = false;
        self.disarm_autoplay();
    }

    /// Stop then start, so the cadence counts from now
    pub fn reset_autoplay(&mut self) {
        self.stop_autoplay();
        self.start_autoplay();
    }

    pub fn toggle_autoplay(&mut self) {
        if self.autoplay.enabled {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
    }

    /// Pointer hovers the slider container
    pub fn pointer_enter(&mut self) {
        if self.config.pause_on_hover {
            self.stop_autoplay();
        }
    }

    /// Pointer left the slider container
    pub fn pointer_leave(&mut self) {
        if self.config.pause_on_hover {
            self.start_autoplay();
        }
    }

    /// Apply an autoplay tick; returns false for stale or foreign tokens
    pub fn on_autoplay_tick(&mut self, token: AutoplayToken) -> bool {
        match &self.autoplay.handle {
            Some((live, _)) if *live == token => {
                self.step(Direction::Forward);
                true
            }
            _ => {
                debug!(slider = %self.name, token = token.0, "Ignoring stale autoplay tick");
                false
            }
        }
    }

    /// Cancel timers and drop gesture state
    pub fn teardown(&mut self) {
        self.stop_autoplay();
        self.gesture = None;
    }

    fn on_key(&mut self, key: NavKey) {
        if !self.config.keyboard {
            return;
        }
        match key {
            NavKey::Left => self.prev(),
            NavKey::Right => self.next(),
        }
    }

    fn reference_width(&self) -> f64 {
        match self.config.drag_reference {
            DragReference::Viewport => self.viewport.viewport_width(),
            DragReference::Track => self.viewport.track_width(),
        }
    }

    /// Move one page; returns false when nothing happened
    fn step(&mut self, direction: Direction) -> bool {
        let target = step_page(
            self.current_page(),
            self.page_count(),
            direction,
            self.config.loop_enabled,
        );
        match target {
            Some(page) => {
                self.show_page(page);
                true
            }
            None => false,
        }
    }

    fn show_page(&mut self, page: usize) {
        self.current_index = base_index_for_page(
            page,
            self.slides.len(),
            self.page_size,
            self.config.granularity,
        );
        debug!(
            slider = %self.name,
            page = self.current_page(),
            index = self.current_index,
            "Showing page"
        );
        self.render();
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.view.render(&frame);
    }

    fn rebuild_pagination(&mut self) {
        // The cap only limits how many controls are drawn, not the page count
        self.dots = build_dots(
            self.page_count(),
            &self.config.dot_label,
            self.config.max_dots,
        );
        self.view.rebuild_pagination(&self.dots);
    }

    /// Restart the cadence after a manual interaction, if autoplay is on
    fn restart_autoplay(&mut self) {
        let suspended = self
            .gesture
            .as_ref()
            .is_some_and(|g| g.suspended_autoplay);
        if self.autoplay.enabled && !suspended {
            self.arm_autoplay();
        }
    }

    /// Arm a fresh timer, cancelling any previous one first
    fn arm_autoplay(&mut self) {
        self.disarm_autoplay();
        if !self.autoplay.enabled || self.slides.is_empty() {
            return;
        }
        let Some(delay) = self.config.autoplay_delay() else {
            return;
        };

        self.autoplay.generation += 1;
        let token = AutoplayToken(self.autoplay.generation);
        let handle = self.scheduler.schedule_repeating(delay, token);
        self.autoplay.handle = Some((token, handle));
    }

    fn disarm_autoplay(&mut self) {
        if let Some((_, mut handle)) = self.autoplay.handle.take() {
            handle.cancel();
        }
    }
}

impl<V, W, S> Drop for SliderController<V, W, S>
where
    S: Scheduler,
{
    fn drop(&mut self) {
        if let Some((_, mut handle)) = self.autoplay.handle.take() {
            handle.cancel();
        }
    }
}
