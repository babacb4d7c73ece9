use crate::tui::{
    messages::{build_transcript_lines, spinner},
    state::ChatView,
    theme,
    welcome::welcome_lines,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const INPUT_HEIGHT: u16 = 3;
const SEND_BUTTON_WIDTH: u16 = 10;

pub fn draw(f: &mut Frame, view: &ChatView, title: &str, frame: usize) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], view, title);
    draw_transcript(f, chunks[1], view, frame);
    draw_input(f, chunks[2], view, frame);
    draw_hint(f, chunks[3], view);
}

fn draw_header(f: &mut Frame, area: Rect, view: &ChatView, title: &str) {
    let status = format!("● {} ", view.status.label());
    let status_width = status.width() as u16;

    let [title_area, status_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(status_width)])
        .areas(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" 💬 ", theme::header_style()),
        Span::styled(title.to_string(), theme::title_style()),
    ]))
    .style(theme::header_style());
    f.render_widget(header, title_area);

    let status = Paragraph::new(status)
        .style(theme::status_style(view.status))
        .alignment(Alignment::Right);
    f.render_widget(status, status_area);
}

fn draw_transcript(f: &mut Frame, area: Rect, view: &ChatView, frame: usize) {
    let block = Block::default().borders(Borders::NONE);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if view.messages.is_empty() {
        let welcome = welcome_lines();
        let top = inner.height.saturating_sub(welcome.len() as u16) / 3;
        let welcome_area = Rect {
            y: inner.y + top,
            height: inner.height - top,
            ..inner
        };
        f.render_widget(Paragraph::new(welcome), welcome_area);
        return;
    }

    let lines = build_transcript_lines(view, inner.width, frame);
    let scroll = transcript_scroll(lines.len(), inner.height);
    let transcript = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(transcript, inner);
}

/// Offset that keeps the newest line at the bottom of the panel
pub fn transcript_scroll(total_lines: usize, visible_lines: u16) -> u16 {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    total.saturating_sub(visible_lines)
}

fn draw_input(f: &mut Frame, area: Rect, view: &ChatView, frame: usize) {
    let enabled = view.input_enabled();

    let [input_area, button_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SEND_BUTTON_WIDTH)])
        .areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(enabled))
        .title(" Message ");
    let content_area = block.inner(input_area);
    f.render_widget(block, input_area);

    if content_area.width > 0 && content_area.height > 0 {
        if view.input.is_empty() {
            let placeholder = if view.is_connected() {
                "Type your message..."
            } else {
                "Waiting for connection..."
            };
            f.render_widget(
                Paragraph::new(placeholder).style(theme::placeholder_style()),
                content_area,
            );
        } else {
            let (visible, _) =
                visible_input(&view.input, view.cursor_position, content_area.width);
            f.render_widget(
                Paragraph::new(visible).style(theme::input_style(enabled)),
                content_area,
            );
        }

        if enabled {
            let (_, cursor_col) =
                visible_input(&view.input, view.cursor_position, content_area.width);
            f.set_cursor_position(Position::new(content_area.x + cursor_col, content_area.y));
        }
    }

    let label = if view.is_loading {
        format!("{} Send", spinner(frame))
    } else {
        "➤ Send".to_string()
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(theme::send_button_style(view.can_submit()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style(false)),
        );
    f.render_widget(button, button_area);
}

fn draw_hint(f: &mut Frame, area: Rect, view: &ChatView) {
    let hint = if view.is_loading {
        "Agent is typing..."
    } else {
        "Press Enter to send message"
    };
    let widget = Paragraph::new(hint)
        .style(theme::hint_style())
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Slice of `input` that fits in `width` columns with the cursor visible,
/// plus the cursor column within that slice.
pub fn visible_input(input: &str, cursor_position: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor_position.min(chars.len());

    // Walk back from the cursor until the prefix no longer fits
    let mut start = cursor;
    let mut used = 0usize;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        start -= 1;
    }

    let mut visible = String::new();
    let mut visible_width = 0usize;
    for ch in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if visible_width + w > width {
            break;
        }
        visible.push(*ch);
        visible_width += w;
    }

    (visible, used as u16)
}
