use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use slidekit_core::deck::{Deck, SlideContent};
use slidekit_core::page::{ActiveSectionTracker, MobileMenu, Section};
use slidekit_core::scheduler::{AutoplayTick, SliderId, TokioScheduler};
use slidekit_core::slider::{Slide, SliderConfig, SliderController, SliderInput};
use slidekit_core::AppConfig;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::input::Action;
use crate::theme::Theme;
use crate::view::{columns_to_px, TerminalView, TerminalViewport};
use crate::widgets::slider::dot_at;

/// Slider controller as used by the terminal front-end
pub type TerminalSlider = SliderController<TerminalView, TerminalViewport, TokioScheduler>;

/// The sliders shown on the page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Projects,
    Testimonials,
    Categories,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [Self::Projects, Self::Testimonials, Self::Categories];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Testimonials => "Testimonials",
            Self::Categories => "Browse by category",
        }
    }

    /// Section id, also used as the slider's log name
    pub fn id(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Testimonials => "testimonials",
            Self::Categories => "categories",
        }
    }
}

/// One slider on screen together with the content of its slides
pub struct SliderPanel {
    pub kind: PanelKind,
    pub controller: TerminalSlider,
    /// Slide content indexed by slide id
    pub contents: Vec<SlideContent>,
}

impl SliderPanel {
    pub fn content(&self, id: usize) -> Option<&SlideContent> {
        self.contents.get(id)
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub panels: Vec<SliderPanel>,
    /// Index of the focused panel
    pub focus: usize,
    /// Navigation menu listing the panels
    pub menu: MobileMenu,
    /// Highlighted menu entry
    pub menu_cursor: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Screen areas of the panels from the last draw, used for mouse hits
    panel_areas: Vec<Rect>,
    /// Panel sections in screen rows, for the menu highlight
    sections: ActiveSectionTracker,
    width_px: Rc<Cell<f64>>,
    hovered: Option<usize>,
    dragging: Option<usize>,
}

impl App {
    /// Build the page. Must run inside a tokio runtime: sliders with
    /// autoplay arm their timers immediately.
    pub fn new(
        config: Arc<AppConfig>,
        deck: &Deck,
        theme: Theme,
        tick_tx: mpsc::UnboundedSender<AutoplayTick>,
        columns: u16,
    ) -> Self {
        let width_px = Rc::new(Cell::new(columns_to_px(columns, config.ui.cell_width_px)));

        let panels = PanelKind::ALL
            .iter()
            .enumerate()
            .map(|(index, &kind)| {
                let (slides, contents, slider_config): (Vec<Slide>, _, SliderConfig) = match kind {
                    PanelKind::Projects => (
                        deck.project_slides(),
                        deck.projects.clone(),
                        config.sliders.projects.clone(),
                    ),
                    PanelKind::Testimonials => (
                        deck.testimonial_slides(),
                        deck.testimonials.clone(),
                        config.sliders.testimonials.clone(),
                    ),
                    PanelKind::Categories => (
                        deck.project_slides(),
                        deck.projects.clone(),
                        config.sliders.categories.clone(),
                    ),
                };

                let controller = SliderController::new(
                    slides,
                    slider_config,
                    TerminalView::new(),
                    TerminalViewport::new(Rc::clone(&width_px)),
                    TokioScheduler::new(SliderId(index), tick_tx.clone()),
                )
                .with_name(kind.id());

                SliderPanel {
                    kind,
                    controller,
                    contents,
                }
            })
            .collect();

        info!(columns, width_px = width_px.get(), "Page initialized");

        Self {
            config,
            theme,
            panels,
            focus: 0,
            menu: MobileMenu::new(),
            menu_cursor: 0,
            should_quit: false,
            status_message: None,
            pending_key: None,
            panel_areas: Vec::new(),
            sections: ActiveSectionTracker::new(Vec::new(), 0.0),
            width_px,
            hovered: None,
            dragging: None,
        }
    }

    pub fn focused_panel(&self) -> &SliderPanel {
        &self.panels[self.focus]
    }

    fn focused_panel_mut(&mut self) -> &mut SliderPanel {
        &mut self.panels[self.focus]
    }

    /// Record where the panels were drawn and follow the focused one
    pub fn set_panel_areas(&mut self, areas: Vec<Rect>) {
        if areas != self.panel_areas {
            let sections = self
                .panels
                .iter()
                .zip(&areas)
                .map(|(panel, area)| {
                    Section::new(panel.kind.id(), f64::from(area.y), f64::from(area.height))
                })
                .collect();
            // Row units, so no header offset
            self.sections = ActiveSectionTracker::new(sections, 0.0);
            self.panel_areas = areas;
        }
        self.track_focus();
    }

    /// Whether `kind` is the section in view, as highlighted in the menu
    pub fn is_section_active(&self, kind: PanelKind) -> bool {
        self.sections.is_link_active(&format!("#{}", kind.id()))
    }

    fn track_focus(&mut self) {
        if let Some(area) = self.panel_areas.get(self.focus) {
            // First row inside the panel's band
            self.sections.update(f64::from(area.y) + 1.0);
        }
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Apply a key action
    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if self.menu.is_open() {
            self.handle_menu_action(action);
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.focused_panel_mut().controller.next(),
            Action::PrevPage => self.focused_panel_mut().controller.prev(),
            Action::FocusNext => self.focus = (self.focus + 1) % self.panels.len(),
            Action::FocusPrev => {
                self.focus = (self.focus + self.panels.len() - 1) % self.panels.len()
            }
            Action::FirstPage => self.focused_panel_mut().controller.go_to_page(0),
            Action::LastPage => {
                let controller = &mut self.focused_panel_mut().controller;
                let last = controller.page_count().saturating_sub(1);
                controller.go_to_page(last);
            }
            Action::GoToPage(page) => self.focused_panel_mut().controller.go_to_page(page),
            Action::PendingG => self.pending_key = Some('g'),
            Action::CycleCategory => self.cycle_category(),
            Action::ToggleAutoplay => self.toggle_autoplay(),
            Action::ToggleMenu => {
                self.menu.toggle();
                self.menu_cursor = self.focus;
            }
            Action::Arrow(key) => {
                for panel in &mut self.panels {
                    panel.controller.dispatch(SliderInput::Key(key));
                }
            }
            Action::ExitMode => self.clear_status(),
            Action::Select | Action::None => {}
        }
    }

    fn handle_menu_action(&mut self, action: Action) {
        let entries = self.panels.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.menu_cursor = (self.menu_cursor + 1) % entries,
            Action::FocusPrev => self.menu_cursor = (self.menu_cursor + entries - 1) % entries,
            Action::Select => {
                self.focus = self.menu_cursor.min(entries - 1);
                self.track_focus();
                self.menu.link_activated();
                let title = self.focused_panel().kind.title();
                self.set_status(format!("Jumped to {}", title));
            }
            Action::ToggleMenu => {
                self.menu.toggle();
            }
            Action::ExitMode => self.menu.close(),
            _ => {}
        }
    }

    /// Switch the category slider (the focused one if grouped) to its next
    /// category
    fn cycle_category(&mut self) {
        let index = if self.focused_panel().controller.categories().is_empty() {
            self.panels
                .iter()
                .position(|p| !p.controller.categories().is_empty())
        } else {
            Some(self.focus)
        };
        let Some(index) = index else {
            self.set_status("No slider is grouped by category");
            return;
        };

        let controller = &mut self.panels[index].controller;
        if let Some(next) = controller.next_category().map(str::to_string) {
            controller.on_category_change(&next);
            self.set_status(format!("Category: {}", next));
        }
    }

    fn toggle_autoplay(&mut self) {
        let controller = &mut self.focused_panel_mut().controller;
        if controller.config().autoplay_delay_ms.is_none() {
            self.set_status("Autoplay is not configured for this slider");
            return;
        }
        controller.toggle_autoplay();
        let state = if controller.is_autoplaying() {
            "on"
        } else {
            "off"
        };
        self.set_status(format!("Autoplay {}", state));
    }

    /// Terminal was resized to `columns`
    pub fn resize(&mut self, columns: u16) {
        if let Some(index) = self.dragging.take() {
            self.panels[index]
                .controller
                .dispatch(SliderInput::PointerCancel);
        }
        self.width_px
            .set(columns_to_px(columns, self.config.ui.cell_width_px));
        for panel in &mut self.panels {
            panel.controller.on_resize();
        }
    }

    /// Deliver an autoplay tick to the slider it belongs to
    pub fn handle_tick(&mut self, tick: AutoplayTick) {
        match self.panels.get_mut(tick.slider.0) {
            Some(panel) => panel
                .controller
                .dispatch(SliderInput::AutoplayTick(tick.token)),
            None => debug!(slider = tick.slider.0, "Tick for unknown slider"),
        }
    }

    /// Translate mouse input into pointer events on the panel under it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = columns_to_px(mouse.column, self.config.ui.cell_width_px);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.panel_at(mouse.column, mouse.row);
                self.update_hover(hit);
                let Some(index) = hit else {
                    return;
                };
                self.focus = index;

                let panel = &mut self.panels[index];
                let page = self.panel_areas.get(index).and_then(|&area| {
                    dot_at(area, panel.controller.dots().len(), mouse.column, mouse.row)
                });
                match page {
                    Some(page) => panel.controller.go_to_page(page),
                    None => {
                        panel.controller.dispatch(SliderInput::PointerDown(x));
                        self.dragging = Some(index);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.dragging {
                    self.panels[index]
                        .controller
                        .dispatch(SliderInput::PointerMove(x));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(index) = self.dragging.take() {
                    self.panels[index].controller.dispatch(SliderInput::PointerUp);
                }
            }
            MouseEventKind::Moved => {
                let hit = self.panel_at(mouse.column, mouse.row);
                self.update_hover(hit);
            }
            _ => {}
        }
    }

    /// Terminal lost focus: cancel the gesture and end any hover
    pub fn focus_lost(&mut self) {
        if let Some(index) = self.dragging.take() {
            self.panels[index]
                .controller
                .dispatch(SliderInput::PointerCancel);
        }
        self.update_hover(None);
    }

    /// Stop every timer before leaving
    pub fn teardown(&mut self) {
        for panel in &mut self.panels {
            panel.controller.teardown();
        }
    }

    fn panel_at(&self, column: u16, row: u16) -> Option<usize> {
        self.panel_areas.iter().position(|area| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        })
    }

    fn update_hover(&mut self, hit: Option<usize>) {
        if hit == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.panels[previous]
                .controller
                .dispatch(SliderInput::PointerLeave);
        }
        if let Some(current) = hit {
            self.panels[current]
                .controller
                .dispatch(SliderInput::PointerEnter);
        }
        self.hovered = hit;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::input::handle_key_event;
    use crate::keymap::Keymap;

    fn app(columns: u16) -> (App, mpsc::UnboundedReceiver<AutoplayTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(
            Arc::new(AppConfig::default()),
            &Deck::sample(),
            Theme::default(),
            tx,
            columns,
        );
        (app, rx)
    }

    fn press(app: &mut App, keymap: &Keymap, code: KeyCode, modifiers: KeyModifiers) {
        let action = handle_key_event(KeyEvent::new(code, modifiers), app, keymap);
        app.handle_action(action);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_keys_drive_focused_slider() {
        let (mut app, _rx) = app(160);
        let keymap = Keymap::default();

        press(&mut app, &keymap, KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(app.panels[0].controller.current_page(), 1);

        press(&mut app, &keymap, KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(app.panels[0].controller.current_page(), 2);

        press(&mut app, &keymap, KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(app.pending_key, Some('g'));
        press(&mut app, &keymap, KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(app.panels[0].controller.current_page(), 0);
        assert_eq!(app.pending_key, None);

        press(&mut app, &keymap, KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.panels[0].controller.current_page(), 1);
    }

    #[tokio::test]
    async fn test_focus_wraps() {
        let (mut app, _rx) = app(160);
        app.handle_action(Action::FocusPrev);
        assert_eq!(app.focused_panel().kind, PanelKind::Categories);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focused_panel().kind, PanelKind::Projects);
    }

    #[tokio::test]
    async fn test_arrows_only_reach_keyboard_sliders() {
        let (mut app, _rx) = app(160);
        let keymap = Keymap::default();

        press(&mut app, &keymap, KeyCode::Right, KeyModifiers::NONE);

        assert_eq!(app.panels[0].controller.current_index(), 0);
        assert_eq!(app.panels[1].controller.current_index(), 0);
        assert_eq!(app.panels[2].controller.current_index(), 1);
    }

    #[tokio::test]
    async fn test_cycle_category_targets_grouped_slider() {
        let (mut app, _rx) = app(160);
        assert_eq!(app.panels[2].controller.active_category(), Some("residential"));

        app.handle_action(Action::CycleCategory);

        assert_eq!(app.panels[2].controller.active_category(), Some("commercial"));
        assert_eq!(app.status_message.as_deref(), Some("Category: commercial"));
    }

    #[tokio::test]
    async fn test_menu_select_focuses_panel() {
        let (mut app, _rx) = app(160);
        let keymap = Keymap::default();

        press(&mut app, &keymap, KeyCode::Char('m'), KeyModifiers::NONE);
        assert!(app.menu.is_open());

        // 'l' is ignored while the menu is open
        press(&mut app, &keymap, KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(app.panels[0].controller.current_index(), 0);

        press(&mut app, &keymap, KeyCode::Char('j'), KeyModifiers::NONE);
        press(&mut app, &keymap, KeyCode::Enter, KeyModifiers::NONE);

        assert!(!app.menu.is_open());
        assert_eq!(app.focused_panel().kind, PanelKind::Testimonials);
    }

    #[tokio::test]
    async fn test_resize_changes_page_size() {
        let (mut app, _rx) = app(160);
        assert_eq!(app.panels[0].controller.page_size(), 3);
        app.handle_action(Action::NextPage);

        app.resize(100);

        assert_eq!(app.panels[0].controller.page_size(), 2);
        assert_eq!(app.panels[0].controller.current_index(), 0);
        assert_eq!(app.panels[0].controller.view().dots().len(), 4);
    }

    #[tokio::test]
    async fn test_mouse_drag_navigates() {
        let (mut app, _rx) = app(160);
        app.set_panel_areas(vec![
            Rect::new(0, 0, 160, 10),
            Rect::new(0, 10, 160, 10),
            Rect::new(0, 20, 160, 10),
        ]);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 100, 4));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 4));
        assert!(app.panels[0].controller.view().frame().dragging);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 4));

        assert_eq!(app.panels[0].controller.current_page(), 1);
        assert!(!app.panels[0].controller.is_dragging());
    }

    #[tokio::test]
    async fn test_menu_highlights_focused_section() {
        let (mut app, _rx) = app(160);
        assert!(!app.is_section_active(PanelKind::Projects));

        app.set_panel_areas(vec![
            Rect::new(0, 0, 160, 10),
            Rect::new(0, 10, 160, 4),
            Rect::new(0, 14, 160, 10),
        ]);
        assert!(app.is_section_active(PanelKind::Projects));

        app.handle_action(Action::ToggleMenu);
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::Select);
        assert_eq!(app.focus, 2);
        assert!(app.is_section_active(PanelKind::Categories));
        assert!(!app.is_section_active(PanelKind::Projects));
    }

    #[tokio::test]
    async fn test_resize_mid_drag_cancels_gesture() {
        let (mut app, _rx) = app(160);
        app.set_panel_areas(vec![
            Rect::new(0, 0, 160, 10),
            Rect::new(0, 10, 160, 10),
            Rect::new(0, 20, 160, 10),
        ]);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 100, 4));
        app.resize(150);
        assert_eq!(app.panels[0].controller.page_size(), 3);
        assert!(!app.panels[0].controller.is_dragging());

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 100, 4));
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 4));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20, 4));

        assert_eq!(app.panels[0].controller.current_page(), 0);
        assert!(!app.panels[0].controller.is_dragging());
    }

    #[tokio::test]
    async fn test_hover_pauses_category_autoplay() {
        let (mut app, _rx) = app(160);
        app.set_panel_areas(vec![
            Rect::new(0, 0, 160, 10),
            Rect::new(0, 10, 160, 10),
            Rect::new(0, 20, 160, 10),
        ]);
        assert!(app.panels[2].controller.is_autoplaying());

        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 25));
        assert!(!app.panels[2].controller.is_autoplaying());

        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 5));
        assert!(app.panels[2].controller.is_autoplaying());
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_tick_advances_category_slider() {
        let (mut app, mut rx) = app(160);

        tokio::time::sleep(Duration::from_millis(5001)).await;
        let tick = rx.recv().await.unwrap();
        assert_eq!(tick.slider, SliderId(2));

        app.handle_tick(tick);
        assert_eq!(app.panels[2].controller.current_index(), 1);
    }

    #[tokio::test]
    async fn test_toggle_autoplay_needs_delay() {
        let (mut app, _rx) = app(160);
        app.handle_action(Action::ToggleAutoplay);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Autoplay is not configured for this slider")
        );

        app.focus = 2;
        app.handle_action(Action::ToggleAutoplay);
        assert!(!app.panels[2].controller.is_autoplaying());
        assert_eq!(app.status_message.as_deref(), Some("Autoplay off"));
    }
}
