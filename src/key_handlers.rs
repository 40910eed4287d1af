use crate::app::App;
use crate::handler::SubmitOutcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

pub async fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Enter => {
            submit_input(app).await;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::End => {
            app.stick_to_bottom = true;
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

/// Drains the input line and hands it to the submission handler on a
/// background task so the draw loop keeps running while the request is in
/// flight. A submit while one is already outstanding is rejected up front,
/// without consuming the input.
async fn submit_input(app: &mut App) {
    if app.input.trim().is_empty() {
        return;
    }

    if app.handler.is_busy() {
        app.logs
            .lock()
            .await
            .add("request already in flight, submit ignored");
        return;
    }

    let query: String = app.input.drain(..).collect();
    app.stick_to_bottom = true;
    app.logs
        .lock()
        .await
        .add(format!("sending query ({} chars)", query.trim().len()));

    let handler = Arc::clone(&app.handler);
    let logs = Arc::clone(&app.logs);
    tokio::spawn(async move {
        let outcome = handler.submit(&query).await;
        let mut logs = logs.lock().await;
        match outcome {
            SubmitOutcome::Answered => logs.add("response received"),
            SubmitOutcome::Failed => logs.add("request failed, see the parley log file"),
            SubmitOutcome::Rejected => logs.add("request already in flight, submit ignored"),
            SubmitOutcome::IgnoredEmpty => {}
        }
    });
}
