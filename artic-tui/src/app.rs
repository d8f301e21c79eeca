//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use artic_lib::table::TableController;

use crate::input::{KeyAction, handle_key};
use crate::render::render;

/// Input mode for the prompt overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Entering the "select first N" quota.
    Quota,
}

/// Frontend-only state: cursor position, prompt buffer, spinner frame.
#[derive(Debug, Default)]
pub struct UiState {
    /// Cursor row within the current page.
    pub cursor: usize,
    pub input_mode: InputMode,
    /// Digit buffer for the quota prompt.
    pub quota_input: String,
    /// One-shot status message shown in the footer.
    pub status: Option<String>,
    /// Draw counter driving the loading spinner.
    pub frame: usize,
}

impl UiState {
    /// Keeps the cursor on a real row after the page changes.
    pub fn clamp_cursor(&mut self, rows: usize) {
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }
}

/// Terminal events delivered to the main loop.
enum Event {
    Tick,
    Key(KeyEvent),
}

/// Polls crossterm on a dedicated thread and forwards events, emitting a
/// tick whenever the poll window elapses quietly.
struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            loop {
                let ready = event::poll(tick_rate).unwrap_or(false);
                let event = if ready {
                    match event::read() {
                        Ok(TermEvent::Key(key)) => Event::Key(key),
                        Ok(_) => Event::Tick,
                        Err(_) => break,
                    }
                } else {
                    Event::Tick
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Main TUI application.
pub struct App {
    controller: TableController,
    ui: UiState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the given controller.
    pub fn new(controller: TableController) -> Self {
        Self {
            controller,
            ui: UiState::default(),
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub async fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut events = EventHandler::new(Duration::from_millis(80));

        // Initial fetch of page 1.
        self.spawn_load(1);

        // Main loop: draw a snapshot, then handle one event.
        while let Some(event) = events.next().await {
            let view = self.controller.view_state();
            self.ui.clamp_cursor(view.records.len());
            self.ui.frame = self.ui.frame.wrapping_add(1);
            terminal.draw(|frame| render(frame, &view, &self.ui))?;

            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
            {
                let action = handle_key(&mut self.ui, &view, key);
                self.dispatch(action);
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn dispatch(&mut self, action: KeyAction) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::LoadPage(page) => self.spawn_load(page),
            KeyAction::ToggleSelect => self.toggle_select_at_cursor(),
            KeyAction::ToggleMode => {
                let mode = self.controller.view_state().selection_mode.toggled();
                self.controller.set_selection_mode(mode);
            }
            KeyAction::SelectFirstN(n) => {
                let controller = self.controller.clone();
                tokio::spawn(async move {
                    let _ = controller.select_first_n(n).await;
                });
            }
        }
    }

    fn spawn_load(&self, page: u32) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            let _ = controller.load_page(page).await;
        });
    }

    fn toggle_select_at_cursor(&mut self) {
        let view = self.controller.view_state();
        if let Some(row) = view.records.get(self.ui.cursor) {
            if view.selection.contains(&row.id) {
                self.controller.deselect_rows(std::slice::from_ref(row));
            } else {
                self.controller.select_rows(std::slice::from_ref(row));
            }
        }
    }
}
