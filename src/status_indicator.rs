use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// One-line status row between the transcript and the input. Whether it shows
/// anything is driven entirely by the transcript's pending indicator.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, pending: Option<&str>) {
        let (icon, text) = match pending {
            Some(text) => (SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()], text),
            None => (" ", ""),
        };

        let status = Line::from(vec![
            Span::styled(icon, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(status),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}
