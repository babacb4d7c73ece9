use crate::tui::state::ChatView;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Apply a key press to the view. Returns true when the user asked to quit.
pub fn handle_key(view: &mut ChatView, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            return true;
        }
        (KeyCode::Enter, _) => {
            view.submit();
        }
        _ if !view.input_enabled() => {}
        (KeyCode::Backspace, _) => {
            view.delete_char();
        }
        (KeyCode::Delete, _) => {
            view.delete_char_forward();
        }
        (KeyCode::Left, _) => {
            view.move_cursor_left();
        }
        (KeyCode::Right, _) => {
            view.move_cursor_right();
        }
        (KeyCode::Home, _) => {
            view.move_cursor_home();
        }
        (KeyCode::End, _) => {
            view.move_cursor_end();
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            view.enter_char(c);
        }
        _ => {}
    }

    false
}
