//! Terminal user interface and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_wrap)]

pub mod input_bar;
pub mod keyboard;
pub mod status_bar;
pub mod theme;
pub mod translate_modal;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::keyboard::KeyboardController;
use crate::models::SlotId;
use crate::services::Translator;
use crate::translate::TranslationOrchestrator;

// Re-export TUI components
pub use input_bar::InputBar;
pub use keyboard::KeyboardWidget;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use translate_modal::TranslateModal;

/// Number of render frames a pressed key stays highlighted.
const FLASH_FRAMES: u8 = 3;

/// Progress added to the loading gauge per tick, capped below completion
/// until the request actually settles.
const PROGRESS_STEP: f64 = 0.04;

/// Application state shared by the event loop and all widgets.
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Active color theme
    pub theme: Theme,
    /// Board controller: key order, layout, reshuffle timing
    pub keyboard: KeyboardController,
    /// Translation request orchestrator
    pub orchestrator: TranslationOrchestrator,
    /// The composed message, appended by accepted key presses
    pub composed: String,
    /// Display index of the selected cell for keyboard-driven presses
    pub selected_index: usize,
    /// Pressed-key highlight: slot identity plus remaining frames
    pub flash: Option<(SlotId, u8)>,
    /// Grid interior from the last render, for mouse hit-testing
    pub keyboard_area: Option<Rect>,
    /// Scroll offset inside the translation modal
    pub modal_scroll: u16,
    /// Simulated progress shown while the remote call is in flight
    pub modal_progress: f64,
    /// Transient status message shown in the status bar
    pub status_message: String,
    /// Error message shown in the status bar
    pub error_message: Option<String>,
    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state for one session.
    #[must_use]
    pub fn new(config: Config, rng: SmallRng, translator: Arc<dyn Translator>) -> Self {
        let keyboard = KeyboardController::new(
            config.keyboard.columns,
            config.keyboard.reshuffle_delay(),
            rng,
        );
        Self {
            theme: Theme::from_mode(config.ui.theme_mode),
            keyboard,
            orchestrator: TranslationOrchestrator::new(translator),
            composed: String::new(),
            selected_index: 0,
            flash: None,
            keyboard_area: None,
            modal_scroll: 0,
            modal_progress: 0.0,
            status_message: String::new(),
            error_message: None,
            should_quit: false,
            config,
        }
    }

    /// Sets a transient status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Sets an error message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clears status and error messages.
    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.error_message = None;
    }

    /// Presses the slot with the given identity: emits its letter into the
    /// composed text, flashes the key, and completes the interaction so the
    /// deferred reshuffle is scheduled.
    pub fn press_slot(&mut self, identity: SlotId) {
        if let Some(ch) = self.keyboard.on_key_press_start(identity) {
            self.composed.push(ch);
        }
        if self.keyboard.pressed() == Some(identity) {
            self.flash = Some((identity, FLASH_FRAMES));
            self.keyboard.on_key_press_end(identity);
        }
    }

    /// Presses the currently selected cell.
    pub fn press_selected(&mut self) {
        if let Some(slot) = self.keyboard.keys().get(self.selected_index) {
            self.press_slot(slot.identity);
        }
    }

    /// Moves the selection by a signed row/column delta, clamped to the keys.
    pub fn move_selection(&mut self, row_delta: i32, col_delta: i32) {
        let Some(layout) = self.keyboard.layout() else {
            return;
        };
        let key_count = self.keyboard.keys().len();
        if key_count == 0 {
            return;
        }
        let columns = i32::from(layout.columns);
        let current = self.selected_index as i32;
        let candidate = current + row_delta * columns + col_delta;
        self.selected_index = candidate.clamp(0, key_count as i32 - 1) as usize;
    }

    /// Submits the composed text for translation and resets the modal view.
    pub fn submit(&mut self) {
        self.modal_progress = 0.0;
        self.modal_scroll = 0;
        self.orchestrator.submit(&self.composed);
    }

    /// Dismisses the translation modal.
    pub fn dismiss_modal(&mut self) {
        self.orchestrator.dismiss();
        self.modal_progress = 0.0;
        self.modal_scroll = 0;
    }

    /// Copies the composed message to the system clipboard, then clears it.
    pub fn copy_composed(&mut self) {
        if self.composed.is_empty() {
            self.set_status("Nothing to copy yet");
            return;
        }
        match arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(self.composed.clone()))
        {
            Ok(()) => {
                self.composed.clear();
                self.set_status("Message copied to clipboard");
            }
            Err(e) => self.set_error(format!("Failed to copy to clipboard: {e}")),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        // Decrement the pressed-key flash counter
        if let Some((identity, frames)) = state.flash {
            if frames > 1 {
                state.flash = Some((identity, frames - 1));
            } else {
                state.flash = None;
            }
        }

        // Advance the loading gauge while a request is in flight
        if state.orchestrator.is_loading() {
            state.modal_progress = (state.modal_progress + PROGRESS_STEP).min(0.9);
        }

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse),
                Event::Resize(_, _) => {
                    // Terminal resized, remeasured on next render
                }
                _ => {}
            }
        }

        // Fire a deferred reshuffle once its deadline passes
        state.keyboard.tick(Instant::now());

        // Poll the orchestrator for settled remote calls
        if state.orchestrator.poll() {
            state.modal_progress = 1.0;
        }

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    // Teardown: a pending reshuffle must not outlive the board
    state.keyboard.cancel_pending_shuffle();

    Ok(())
}

/// Handle a key event. Returns `true` when the user quits.
fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    state.clear_messages();

    // Modal input takes precedence while the translation surface is open
    if state.orchestrator.state().is_active() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.dismiss_modal(),
            KeyCode::Up => state.modal_scroll = state.modal_scroll.saturating_sub(1),
            KeyCode::Down => state.modal_scroll = state.modal_scroll.saturating_add(1),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::Left => state.move_selection(0, -1),
        KeyCode::Right => state.move_selection(0, 1),
        KeyCode::Up => state.move_selection(-1, 0),
        KeyCode::Down => state.move_selection(1, 0),
        KeyCode::Enter | KeyCode::Char(' ') => state.press_selected(),
        KeyCode::Char('t') => state.submit(),
        KeyCode::Char('c') => state.copy_composed(),
        KeyCode::Char('x') => {
            state.composed.clear();
            state.set_status("Message cleared");
        }
        KeyCode::Backspace => {
            state.composed.pop();
        }
        _ => {}
    }

    Ok(false)
}

/// Handle a mouse event: press on a cell starts an interaction, release
/// completes it.
fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.orchestrator.state().is_active() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (Some(inner), Some(layout)) = (state.keyboard_area, state.keyboard.layout())
            else {
                return;
            };
            let key_count = state.keyboard.keys().len();
            if let Some(index) =
                KeyboardWidget::hit_test(inner, &layout, key_count, mouse.column, mouse.row)
            {
                state.selected_index = index;
                if let Some(slot) = state.keyboard.keys().get(index) {
                    let identity = slot.identity;
                    if let Some(ch) = state.keyboard.on_key_press_start(identity) {
                        state.composed.push(ch);
                    }
                    state.flash = Some((identity, FLASH_FRAMES));
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(identity) = state.keyboard.pressed() {
                state.keyboard.on_key_press_end(identity);
            }
        }
        _ => {}
    }
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &mut AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Input bar
            Constraint::Min(8),    // Board
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    InputBar::render(f, chunks[1], state);

    // Measure the board interior before drawing; the first measurement moves
    // the controller from Measuring to Ready.
    let inner = chunks[2].inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    state.keyboard.on_container_measured(inner.width, inner.height);
    state.keyboard_area = Some(inner);

    KeyboardWidget::render(f, chunks[2], state);
    StatusBar::render(f, chunks[3], state, &state.theme);

    // Translation surface covers the board while a request is active
    if state.orchestrator.state().is_active() {
        TranslateModal::render(f, f.area(), state);
    }
}

/// Render the title line.
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(Line::from(Span::styled(
        APP_NAME,
        Style::default()
            .fg(state.theme.primary)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}
