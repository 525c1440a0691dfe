use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use slidekit_core::scheduler::AutoplayTick;
use slidekit_core::{AppConfig, Deck};
use slidekit_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{MenuWidget, SliderWidget, StatusBarWidget},
    App, Theme,
};

pub async fn run(config: Arc<AppConfig>, deck: Deck) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Slidekit")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Autoplay timers report back over this channel
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<AutoplayTick>();

    let columns = terminal.size()?.width;
    let mut app = App::new(config.clone(), &deck, Theme::default(), tick_tx, columns);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    info!(
        projects = deck.projects.len(),
        testimonials = deck.testimonials.len(),
        "Session started"
    );

    let result = main_loop(&mut terminal, &mut app, &keymap, &event_handler, &mut tick_rx);
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    info!("Session ended");
    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
    tick_rx: &mut mpsc::UnboundedReceiver<AutoplayTick>,
) -> Result<()> {
    loop {
        // Apply autoplay ticks that arrived since the last frame (non-blocking)
        while let Ok(tick) = tick_rx.try_recv() {
            app.handle_tick(tick);
        }

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: sliders + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Ratio(2, 5), // Projects
                    Constraint::Ratio(1, 5), // Testimonials
                    Constraint::Ratio(2, 5), // Categories
                ])
                .split(main_layout[0]);
            app.set_panel_areas(rows.to_vec());

            for (index, area) in rows.iter().enumerate() {
                SliderWidget::render(frame, *area, app, index);
            }
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.menu.is_open() {
                MenuWidget::render(frame, app);
            }
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::FocusLost => app.focus_lost(),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
