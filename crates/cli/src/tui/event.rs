//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Quit the application
    Quit,
    /// Force quit the application (Ctrl+C)
    ForceQuit,
    /// Move cursor up
    CursorUp,
    /// Move cursor down
    CursorDown,
    /// Move cursor left
    CursorLeft,
    /// Move cursor right
    CursorRight,
    /// Select/confirm action (Enter or Space)
    Select,
    /// Mouse click at board position (row, col)
    Click(usize, usize),
    /// Undo last move
    Undo,
    /// Start a new game
    NewGame,
    /// Show hints
    Hint,
    /// Force AI to move
    Go,
    /// Change game mode
    ChangeMode,
    /// Change AI level
    ChangeLevel,
    /// Character input (for dialogs)
    Char(char),
    /// Backspace key
    Backspace,
    /// Tab key (cycle forward through dialog fields)
    Tab,
    /// Shift+Tab (cycle backward through dialog fields)
    BackTab,
    /// Open the board editor dialog
    EditBoard,
}

/// Board area configuration for mouse click detection.
/// These values should match the render layout.
pub struct BoardArea {
    pub start_row: u16,
    pub start_col: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for BoardArea {
    fn default() -> Self {
        Self {
            // Layout calculation:
            // - Title block: 3 rows (y=0-2)
            // - Content starts at y=3
            // - Board block border: +1 row
            // - Board inner area starts at y=4
            // - Column header row: y=4
            // - Top border row: y=5
            // - First cell row (row=0): y=6
            start_row: 6,
            // - Board block border: +1 col
            // - Row number + separator: 3 chars ("1 │")
            // - Cell content starts at x=4 (1 + 3)
            start_col: 4,
            cell_width: 4,  // Each cell is 4 chars wide (" X │")
            cell_height: 2, // Each cell is 2 rows tall (content + separator)
        }
    }
}

/// Polls for an event with a timeout.
///
/// When `text_input` is true (a dialog with a free-text field is open), printable
/// characters are always reported as [`Event::Char`] rather than being intercepted
/// as game shortcuts (e.g. so typing "a1" into the board editor doesn't move the
/// cursor instead of entering the letter 'a').
pub fn poll_event(timeout: Duration, text_input: bool) -> std::io::Result<Option<Event>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            // Check for Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c'))
            {
                return Ok(Some(Event::ForceQuit));
            }
            if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::BackTab {
                return Ok(Some(Event::BackTab));
            }
            Ok(Some(map_key_event(key.code, text_input)))
        }
        CrosstermEvent::Mouse(mouse) => Ok(map_mouse_event(mouse)),
        _ => Ok(None),
    }
}

/// Maps a key code to an application event.
fn map_key_event(code: KeyCode, text_input: bool) -> Event {
    match code {
        // Always-available controls, even while typing
        KeyCode::Esc => Event::Quit,
        KeyCode::Enter => Event::Select,
        KeyCode::Backspace => Event::Backspace,
        KeyCode::Tab => Event::Tab,
        KeyCode::BackTab => Event::BackTab,
        KeyCode::Up => Event::CursorUp,
        KeyCode::Down => Event::CursorDown,
        KeyCode::Left => Event::CursorLeft,
        KeyCode::Right => Event::CursorRight,

        KeyCode::Char(c) if text_input => Event::Char(c),

        // Quit
        KeyCode::Char('q') => Event::Quit,

        // Cursor movement - WASD / vim style
        KeyCode::Char('w') | KeyCode::Char('k') => Event::CursorUp,
        KeyCode::Char('s') | KeyCode::Char('j') => Event::CursorDown,
        KeyCode::Char('a') | KeyCode::Char('h') => Event::CursorLeft,
        KeyCode::Char('d') | KeyCode::Char('l') => Event::CursorRight,

        // Selection
        KeyCode::Char(' ') => Event::Select,

        // Game commands
        KeyCode::Char('u') => Event::Undo,
        KeyCode::Char('n') => Event::NewGame,
        KeyCode::Char('i') => Event::Hint,
        KeyCode::Char('g') => Event::Go,
        KeyCode::Char('m') => Event::ChangeMode,
        KeyCode::Char('v') => Event::ChangeLevel,
        KeyCode::Char('e') => Event::EditBoard,

        // Other characters
        KeyCode::Char(c) => Event::Char(c),

        // Default
        _ => Event::Char('\0'),
    }
}

/// Maps a mouse event to an application event.
fn map_mouse_event(mouse: crossterm::event::MouseEvent) -> Option<Event> {
    match mouse.kind {
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => {
            let board_area = BoardArea::default();

            // Check if click is within board area
            if mouse.row >= board_area.start_row && mouse.column >= board_area.start_col {
                let row = (mouse.row - board_area.start_row) / board_area.cell_height;
                let col = (mouse.column - board_area.start_col) / board_area.cell_width;

                if row < 8 && col < 8 {
                    return Some(Event::Click(row as usize, col as usize));
                }
            }
            None
        }
        _ => None,
    }
}
