use crate::app::App;
use crate::log_view::LogView;
use crate::message::{Message, Sender};
use crate::transcript::Transcript;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Draws the whole screen: transcript pane, status row, input line, and the
/// session log pane on the right.
pub fn draw_chat(f: &mut Frame, app: &mut App, transcript: &Transcript, logs: &LogView) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, transcript, chat_chunks[0]);
    app.status_indicator
        .render(f, chat_chunks[1], transcript.pending());
    draw_input(f, app, chat_chunks[2]);
    draw_logs(f, logs, horizontal_chunks[1], size);
}

fn draw_messages(f: &mut Frame, app: &mut App, transcript: &Transcript, area: Rect) {
    let mut lines = Vec::new();
    for message in transcript.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area));
    }

    if let Some(pending) = transcript.pending() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            pending.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.stick_to_bottom {
        app.scroll = max_scroll;
    } else if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((app.scroll, 0)), area);
}

fn render_message(message: &Message, area: Rect) -> Vec<Line<'static>> {
    let (style, label, indent) = match message.sender {
        Sender::User => (
            Style::default().fg(Color::Rgb(255, 223, 128)),
            "you",
            "  ",
        ),
        Sender::Bot => (
            Style::default().fg(Color::Rgb(144, 238, 144)),
            "bot",
            "",
        ),
    };

    let timestamp = message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    let mut lines = vec![Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        Span::styled(" ".to_string(), style),
        Span::styled(label.to_string(), style.add_modifier(Modifier::BOLD)),
    ])];

    let wrap_width = (area.width as usize).saturating_sub(4).max(1);
    for wrapped in wrap(&message.content, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped.to_string(), style),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_logs(f: &mut Frame, logs: &LogView, area: Rect, size: Rect) {
    let vsep = "│".repeat(size.height.saturating_sub(2) as usize);
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    // Show the tail that fits
    let visible = area.height as usize;
    let skip = logs.entries.len().saturating_sub(visible);
    let log_lines: Vec<Line> = logs
        .entries
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para, area);
}
