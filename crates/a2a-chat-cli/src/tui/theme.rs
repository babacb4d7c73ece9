use crate::tui::state::ConnectionStatus;
use ratatui::style::{Color, Modifier, Style};

pub const HEADER_BG: Color = Color::Rgb(30, 41, 59);
pub const HEADER_FG: Color = Color::White;
pub const ACCENT_FG: Color = Color::LightBlue;
pub const USER_FG: Color = Color::LightBlue;
pub const ASSISTANT_FG: Color = Color::Gray;
pub const SYSTEM_FG: Color = Color::DarkGray;
pub const ERROR_FG: Color = Color::LightRed;
pub const HINT_FG: Color = Color::DarkGray;
pub const INPUT_FG: Color = Color::White;
pub const BORDER_FG: Color = Color::DarkGray;

pub fn header_style() -> Style {
    Style::default().bg(HEADER_BG).fg(HEADER_FG)
}

pub fn title_style() -> Style {
    header_style().add_modifier(Modifier::BOLD)
}

pub fn status_style(status: ConnectionStatus) -> Style {
    let fg = match status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Error => Color::Red,
        ConnectionStatus::Disconnected => Color::Gray,
    };
    Style::default().bg(HEADER_BG).fg(fg)
}

pub fn user_style() -> Style {
    Style::default().fg(USER_FG)
}

pub fn assistant_style() -> Style {
    Style::default().fg(ASSISTANT_FG)
}

pub fn system_style(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(ERROR_FG)
    } else {
        Style::default().fg(SYSTEM_FG)
    }
}

pub fn label_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn hint_style() -> Style {
    Style::default().fg(HINT_FG)
}

pub fn input_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(INPUT_FG)
    } else {
        Style::default().fg(HINT_FG).add_modifier(Modifier::DIM)
    }
}

pub fn placeholder_style() -> Style {
    Style::default().fg(HINT_FG).add_modifier(Modifier::ITALIC)
}

pub fn border_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(ACCENT_FG)
    } else {
        Style::default().fg(BORDER_FG)
    }
}

pub fn send_button_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    }
}
