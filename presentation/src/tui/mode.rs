//! Key bindings
//!
//! The TUI has a single editing mode: keys edit the draft, Enter submits,
//! and a few control keys scroll, print, toggle help or quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines moved per PageUp/PageDown
pub const PAGE_LINES: usize = 10;

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: usize = 3;

/// User action derived from key and mouse events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the draft (Enter)
    Submit,
    /// Insert character into the draft
    InsertChar(char),
    /// Delete character before the cursor (Backspace)
    DeleteChar,
    /// Delete character under the cursor (Delete)
    DeleteForward,
    /// Empty the draft (Ctrl+U)
    ClearInput,
    CursorLeft,
    CursorRight,
    /// Move to start of line
    CursorStart,
    /// Move to end of line
    CursorEnd,
    /// Scroll the conversation towards older messages
    ScrollUp(usize),
    /// Scroll the conversation towards newer messages
    ScrollDown(usize),
    /// Jump back to the newest message
    ScrollToBottom,
    /// Print the conversation (Ctrl+P)
    Print,
    /// Show or hide the help overlay (F1)
    ToggleHelp,
    /// Close an overlay, or quit when none is open (Esc)
    Cancel,
    /// Quit application (Ctrl+C / Ctrl+D)
    Quit,
    /// No action
    None,
}

/// Key event handler - maps terminal events to actions
pub struct KeyHandler;

impl KeyHandler {
    /// Handle a key event
    pub fn handle(key: KeyEvent) -> Action {
        // Ignore key releases on terminals that report them
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Action::Quit,
            KeyCode::Char('p') if ctrl => Action::Print,
            KeyCode::Char('u') if ctrl => Action::ClearInput,
            KeyCode::Char('a') if ctrl => Action::CursorStart,
            KeyCode::Char('e') if ctrl => Action::CursorEnd,
            KeyCode::Char('l') if ctrl => Action::ScrollToBottom,
            KeyCode::Char(_) if ctrl => Action::None,
            KeyCode::Char(c) => Action::InsertChar(c),

            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::DeleteChar,
            KeyCode::Delete => Action::DeleteForward,
            KeyCode::Left => Action::CursorLeft,
            KeyCode::Right => Action::CursorRight,
            KeyCode::Home => Action::CursorStart,
            KeyCode::End if ctrl => Action::ScrollToBottom,
            KeyCode::End => Action::CursorEnd,

            KeyCode::Up => Action::ScrollUp(1),
            KeyCode::Down => Action::ScrollDown(1),
            KeyCode::PageUp => Action::ScrollUp(PAGE_LINES),
            KeyCode::PageDown => Action::ScrollDown(PAGE_LINES),

            KeyCode::F(1) => Action::ToggleHelp,
            KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        }
    }

    /// Handle a mouse event (wheel scrolling only)
    pub fn handle_mouse(event: MouseEvent) -> Action {
        match event.kind {
            MouseEventKind::ScrollUp => Action::ScrollUp(WHEEL_LINES),
            MouseEventKind::ScrollDown => Action::ScrollDown(WHEEL_LINES),
            _ => Action::None,
        }
    }
}
