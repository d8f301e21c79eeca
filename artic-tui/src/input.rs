//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use artic_lib::table::ViewState;

use crate::app::{InputMode, UiState};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Load the given 1-based page.
    LoadPage(u32),
    /// Toggle selection of the row at the cursor.
    ToggleSelect,
    /// Toggle single/multiple selection mode.
    ToggleMode,
    /// Select the first N records across pages.
    SelectFirstN(u64),
}

/// Handles key input and updates frontend state.
pub fn handle_key(ui: &mut UiState, view: &ViewState, key: KeyEvent) -> KeyAction {
    match ui.input_mode {
        InputMode::Normal => handle_normal_mode(ui, view, key),
        InputMode::Quota => handle_quota_mode(ui, key),
    }
}

fn handle_normal_mode(ui: &mut UiState, view: &ViewState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Cursor movement within the page
        KeyCode::Char('j') | KeyCode::Down => {
            if ui.cursor + 1 < view.records.len() {
                ui.cursor += 1;
            }
            KeyAction::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ui.cursor = ui.cursor.saturating_sub(1);
            KeyAction::None
        }

        // Page navigation
        KeyCode::Char('n') | KeyCode::Right => {
            if view.page_index < view.total_pages() {
                ui.cursor = 0;
                KeyAction::LoadPage(view.page_index + 1)
            } else {
                KeyAction::None
            }
        }
        KeyCode::Char('p') | KeyCode::Left => {
            if view.page_index > 1 {
                ui.cursor = 0;
                KeyAction::LoadPage(view.page_index - 1)
            } else {
                KeyAction::None
            }
        }
        KeyCode::Char('r') => KeyAction::LoadPage(view.page_index.max(1)),

        // Selection
        KeyCode::Char(' ') => KeyAction::ToggleSelect,
        KeyCode::Char('m') => KeyAction::ToggleMode,
        KeyCode::Char('s') => {
            ui.input_mode = InputMode::Quota;
            ui.quota_input.clear();
            ui.status = None;
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

fn handle_quota_mode(ui: &mut UiState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            ui.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Enter => {
            ui.input_mode = InputMode::Normal;
            match ui.quota_input.parse::<u64>() {
                Ok(n) if n > 0 => KeyAction::SelectFirstN(n),
                _ => {
                    ui.status = Some("Enter a positive number of rows".to_string());
                    KeyAction::None
                }
            }
        }
        KeyCode::Backspace => {
            ui.quota_input.pop();
            KeyAction::None
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            ui.quota_input.push(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
