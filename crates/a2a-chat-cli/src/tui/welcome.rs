use crate::tui::theme;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::Line,
};

/// Panel shown while the transcript is empty
pub fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("💬").style(Style::default().fg(theme::ACCENT_FG)),
        Line::from(""),
        Line::from("Welcome to A2A Chat").style(
            Style::default()
                .fg(theme::ASSISTANT_FG)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from("Start a conversation with the agent").style(theme::hint_style()),
    ]
    .into_iter()
    .map(|line| line.alignment(Alignment::Center))
    .collect()
}
