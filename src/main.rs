use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parley::{
    api::HttpChatBackend, app::App, chat_view::draw_chat, config::ChatConfig,
    handler::ChatSubmissionHandler, key_handlers::handle_chat_input, log_view::LogView,
    logging, transcript::Transcript,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _logger = logging::init()?;

    let config = ChatConfig::from_env()?;
    log::info!("using chat endpoint {}", config.endpoint_url);

    let transcript = Arc::new(Mutex::new(Transcript::new()));
    let backend = HttpChatBackend::new(&config);
    let handler = Arc::new(ChatSubmissionHandler::new(backend, Arc::clone(&transcript)));
    let logs = Arc::new(Mutex::new(LogView::new()));
    let mut app = App::new(handler, transcript, logs);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_chat_input(key, app).await;
                }
            }
        }

        app.tick_spinner();

        // Snapshot shared state so the draw closure holds no locks
        let transcript = app.transcript.lock().await.clone();
        let logs = app.logs.lock().await.clone();
        terminal.draw(|f| draw_chat(f, app, &transcript, &logs))?;

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
