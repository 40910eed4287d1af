use crate::api::HttpChatBackend;
use crate::handler::ChatSubmissionHandler;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;
use crate::transcript::Transcript;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Terminal UI state. The transcript and session log live behind `Arc<Mutex>`
/// so the spawned submission task can update them while the draw loop keeps
/// running.
pub struct App {
    pub input: String,
    pub scroll: u16,
    pub stick_to_bottom: bool,
    pub should_quit: bool,
    pub status_indicator: StatusIndicator,
    pub handler: Arc<ChatSubmissionHandler<HttpChatBackend>>,
    pub transcript: Arc<Mutex<Transcript>>,
    pub logs: Arc<Mutex<LogView>>,
    last_spinner_tick: Instant,
}

impl App {
    pub fn new(
        handler: Arc<ChatSubmissionHandler<HttpChatBackend>>,
        transcript: Arc<Mutex<Transcript>>,
        logs: Arc<Mutex<LogView>>,
    ) -> Self {
        Self {
            input: String::new(),
            scroll: 0,
            stick_to_bottom: true,
            should_quit: false,
            status_indicator: StatusIndicator::new(),
            handler,
            transcript,
            logs,
            last_spinner_tick: Instant::now(),
        }
    }

    pub fn scroll_up(&mut self) {
        self.stick_to_bottom = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn tick_spinner(&mut self) {
        if self.last_spinner_tick.elapsed() >= Duration::from_millis(80) {
            self.status_indicator.update_spinner();
            self.last_spinner_tick = Instant::now();
        }
    }
}
