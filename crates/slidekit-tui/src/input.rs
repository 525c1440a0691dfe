use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use slidekit_core::slider::NavKey;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    FocusNext,
    FocusPrev,
    FirstPage,
    LastPage,
    PendingG, // First 'g' press, waiting for second 'g'
    GoToPage(usize),
    CycleCategory,
    ToggleAutoplay,
    ToggleMenu,
    Select,
    /// Arrow keys go to every slider that listens to the keyboard
    Arrow(NavKey),
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    if app.menu.is_open() {
        return handle_menu_mode(binding, keymap);
    }

    // Page shortcuts
    if let (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) = (key.code, key.modifiers) {
        return Action::GoToPage(c as usize - '1' as usize);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Left, KeyModifiers::NONE) => return Action::Arrow(NavKey::Left),
        (KeyCode::Right, KeyModifiers::NONE) => return Action::Arrow(NavKey::Right),
        _ => {}
    }

    if keymap.is_g_prefix(&binding) {
        return match (app.pending_key, keymap.get_pending_g_action()) {
            (Some('g'), Some(action)) => action.clone(),
            _ => Action::PendingG,
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events while the navigation menu is open
fn handle_menu_mode(binding: KeyBinding, keymap: &Keymap) -> Action {
    match keymap.get(&binding) {
        Some(
            action @ (Action::Quit
            | Action::FocusNext
            | Action::FocusPrev
            | Action::Select
            | Action::ToggleMenu
            | Action::ExitMode),
        ) => action.clone(),
        _ => Action::None,
    }
}
