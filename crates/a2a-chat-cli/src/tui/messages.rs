use crate::tui::{message::Message, state::ChatView, theme};
use a2a_chat_agent::Role;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MIN_BUBBLE_WIDTH: u16 = 20;

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Transcript as pre-wrapped lines, so the caller knows the exact height.
pub fn build_transcript_lines(view: &ChatView, width: u16, frame: usize) -> Vec<Line<'static>> {
    let bubble_width = (width.saturating_mul(3) / 4).max(MIN_BUBBLE_WIDTH).min(width) as usize;
    let mut lines = Vec::new();

    for message in &view.messages {
        lines.extend(render_message(message, bubble_width, frame));
        lines.push(Line::from(""));
    }

    lines
}

fn render_message(message: &Message, bubble_width: usize, frame: usize) -> Vec<Line<'static>> {
    let (alignment, style) = match message.role {
        Role::User => (Alignment::Right, theme::user_style()),
        Role::Assistant => (Alignment::Left, theme::assistant_style()),
        Role::System => (Alignment::Center, theme::system_style(message.is_error)),
    };

    let body = wrap_text(&message.content, bubble_width);

    if message.role == Role::System {
        return body
            .into_iter()
            .map(|text| Line::from(Span::styled(text, style)).alignment(alignment))
            .collect();
    }

    let (icon, label) = match message.role {
        Role::User => ("🧑", "You"),
        _ => ("🤖", "Assistant"),
    };
    let mut header = vec![
        Span::raw(format!("{icon} ")),
        Span::styled(label, theme::label_style()),
    ];
    if message.is_streaming {
        header.push(Span::styled(
            format!(" {}", spinner(frame)),
            Style::default().fg(theme::ACCENT_FG),
        ));
    }

    let block_width = body
        .iter()
        .map(|text| text.width())
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::from(header).alignment(alignment)];
    for text in body {
        // Pad so a right-aligned bubble keeps a straight left edge
        let padding = block_width.saturating_sub(text.width());
        let padded = if alignment == Alignment::Right {
            format!("{text}{}", " ".repeat(padding))
        } else {
            text
        };
        lines.push(Line::from(Span::styled(padded, style)).alignment(alignment));
    }
    lines.push(
        Line::from(Span::styled(
            message.timestamp.format("%H:%M:%S").to_string(),
            theme::hint_style(),
        ))
        .alignment(alignment),
    );

    lines
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }

            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
