use crate::api::ChatBackend;
use crate::constants::{GENERIC_FAILURE_MESSAGE, NO_RESPONSE_FALLBACK, PENDING_MESSAGE};
use crate::message::Message;
use crate::transcript::Transcript;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a call to [`ChatSubmissionHandler::submit`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened.
    IgnoredEmpty,
    /// Another request was already in flight; nothing happened.
    Rejected,
    /// The backend replied and a bot message was appended.
    Answered,
    /// The request failed and the generic failure message was appended.
    Failed,
}

/// Drives one chat exchange: append the user's message, show the pending
/// indicator, make a single backend request, then append either the reply or
/// a generic failure message. Collaborators are injected at construction.
pub struct ChatSubmissionHandler<B> {
    backend: B,
    transcript: Arc<Mutex<Transcript>>,
    busy: AtomicBool,
}

impl<B: ChatBackend> ChatSubmissionHandler<B> {
    pub fn new(backend: B, transcript: Arc<Mutex<Transcript>>) -> Self {
        Self {
            backend,
            transcript,
            busy: AtomicBool::new(false),
        }
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn transcript(&self) -> Arc<Mutex<Transcript>> {
        Arc::clone(&self.transcript)
    }

    /// Runs the full submission lifecycle. The transcript lock is released
    /// before the backend call, so the UI can keep rendering while the
    /// request is outstanding. Errors never escape: every failure becomes a
    /// bot message plus a log entry.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let query = input.trim();
        if query.is_empty() {
            return SubmitOutcome::IgnoredEmpty;
        }

        // At most one request in flight per handler; later submits are
        // rejected rather than queued.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("submit rejected: a request is already in flight");
            return SubmitOutcome::Rejected;
        }

        // The user sees their own message even if the request later fails.
        {
            let mut transcript = self.transcript.lock().await;
            transcript.push(Message::user(query));
            transcript.set_pending(PENDING_MESSAGE);
        }

        let result = self.backend.send_query(query).await;

        let outcome = {
            let mut transcript = self.transcript.lock().await;
            transcript.clear_pending();
            match result {
                Ok(reply) => {
                    let text = reply
                        .response
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string());
                    transcript.push(Message::bot(text));
                    SubmitOutcome::Answered
                }
                Err(err) => {
                    log::error!("chat request failed: {}", err);
                    // clear_pending is a no-op when the indicator is already gone
                    transcript.clear_pending();
                    transcript.push(Message::bot(GENERIC_FAILURE_MESSAGE));
                    SubmitOutcome::Failed
                }
            }
        };

        self.busy.store(false, Ordering::SeqCst);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatResponse;
    use crate::errors::{ParleyError, ParleyResult};
    use crate::message::Sender;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn shared_transcript() -> Arc<Mutex<Transcript>> {
        Arc::new(Mutex::new(Transcript::new()))
    }

    /// Replies with a canned result.
    struct CannedBackend {
        result: std::sync::Mutex<Option<ParleyResult<ChatResponse>>>,
    }

    impl CannedBackend {
        fn new(result: ParleyResult<ChatResponse>) -> Self {
            Self {
                result: std::sync::Mutex::new(Some(result)),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(Ok(ChatResponse {
                response: Some(text.to_string()),
            }))
        }
    }

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn send_query(&self, _query: &str) -> ParleyResult<ChatResponse> {
            self.result.lock().unwrap().take().expect("backend called twice")
        }
    }

    /// Records what the transcript looked like at the moment the backend was
    /// invoked.
    struct ProbeBackend {
        transcript: Arc<Mutex<Transcript>>,
        saw_user_message: AtomicBool,
        saw_pending: AtomicBool,
        called: AtomicBool,
    }

    #[async_trait]
    impl ChatBackend for ProbeBackend {
        async fn send_query(&self, query: &str) -> ParleyResult<ChatResponse> {
            let transcript = self.transcript.lock().await;
            self.called.store(true, Ordering::SeqCst);
            self.saw_user_message.store(
                matches!(
                    transcript.last(),
                    Some(m) if m.sender == Sender::User && m.content == query
                ),
                Ordering::SeqCst,
            );
            self.saw_pending
                .store(transcript.is_pending(), Ordering::SeqCst);
            Ok(ChatResponse {
                response: Some("ok".to_string()),
            })
        }
    }

    /// Blocks until the test releases it.
    struct StallingBackend {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ChatBackend for StallingBackend {
        async fn send_query(&self, _query: &str) -> ParleyResult<ChatResponse> {
            self.gate.notified().await;
            Ok(ChatResponse {
                response: Some("late reply".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_input_has_no_observable_effect() {
        let transcript = shared_transcript();
        let probe = Arc::new(ProbeBackend {
            transcript: Arc::clone(&transcript),
            saw_user_message: AtomicBool::new(false),
            saw_pending: AtomicBool::new(false),
            called: AtomicBool::new(false),
        });
        let handler = ChatSubmissionHandler::new(Arc::clone(&probe), Arc::clone(&transcript));

        for input in ["", "   ", "\t\n  "] {
            assert_eq!(handler.submit(input).await, SubmitOutcome::IgnoredEmpty);
        }

        assert!(!probe.called.load(Ordering::SeqCst));
        assert!(transcript.lock().await.is_empty());
        assert!(!handler.is_busy());
    }

    #[tokio::test]
    async fn test_user_message_and_pending_precede_network_call() {
        let transcript = shared_transcript();
        let probe = Arc::new(ProbeBackend {
            transcript: Arc::clone(&transcript),
            saw_user_message: AtomicBool::new(false),
            saw_pending: AtomicBool::new(false),
            called: AtomicBool::new(false),
        });
        let handler = ChatSubmissionHandler::new(Arc::clone(&probe), Arc::clone(&transcript));

        assert_eq!(handler.submit("  hello  ").await, SubmitOutcome::Answered);

        assert!(probe.saw_user_message.load(Ordering::SeqCst));
        assert!(probe.saw_pending.load(Ordering::SeqCst));

        let transcript = transcript.lock().await;
        // Trimmed before appending
        assert_eq!(transcript.messages()[0].content, "hello");
        assert!(!transcript.is_pending());
    }

    #[tokio::test]
    async fn test_reply_appended_as_bot_message() {
        let transcript = shared_transcript();
        let handler =
            ChatSubmissionHandler::new(CannedBackend::replying("Hello!"), Arc::clone(&transcript));

        assert_eq!(handler.submit("hi").await, SubmitOutcome::Answered);

        let transcript = transcript.lock().await;
        assert_eq!(transcript.len(), 2);
        let bot = transcript.last().unwrap();
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, "Hello!");
    }

    #[tokio::test]
    async fn test_missing_response_field_uses_fallback() {
        let transcript = shared_transcript();
        let handler = ChatSubmissionHandler::new(
            CannedBackend::new(Ok(ChatResponse { response: None })),
            Arc::clone(&transcript),
        );

        assert_eq!(handler.submit("hi").await, SubmitOutcome::Answered);
        assert_eq!(
            transcript.lock().await.last().unwrap().content,
            NO_RESPONSE_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_empty_response_string_uses_fallback() {
        let transcript = shared_transcript();
        let handler = ChatSubmissionHandler::new(
            CannedBackend::new(Ok(ChatResponse {
                response: Some(String::new()),
            })),
            Arc::clone(&transcript),
        );

        assert_eq!(handler.submit("hi").await, SubmitOutcome::Answered);
        assert_eq!(
            transcript.lock().await.last().unwrap().content,
            NO_RESPONSE_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_http_error_yields_generic_failure_message() {
        let transcript = shared_transcript();
        let handler = ChatSubmissionHandler::new(
            CannedBackend::new(Err(ParleyError::Http {
                status: 500,
                detail: "boom".to_string(),
            })),
            Arc::clone(&transcript),
        );

        assert_eq!(handler.submit("hi").await, SubmitOutcome::Failed);

        let transcript = transcript.lock().await;
        assert!(!transcript.is_pending());
        let bot = transcript.last().unwrap();
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_network_error_yields_generic_failure_message() {
        let transcript = shared_transcript();
        let handler = ChatSubmissionHandler::new(
            CannedBackend::new(Err(ParleyError::network("connection refused"))),
            Arc::clone(&transcript),
        );

        assert_eq!(handler.submit("hi").await, SubmitOutcome::Failed);

        let transcript = transcript.lock().await;
        assert!(!transcript.is_pending());
        assert_eq!(transcript.last().unwrap().content, GENERIC_FAILURE_MESSAGE);
        assert!(!handler.is_busy());
    }

    #[tokio::test]
    async fn test_overlapping_submit_is_rejected() {
        let transcript = shared_transcript();
        let gate = Arc::new(Notify::new());
        let handler = Arc::new(ChatSubmissionHandler::new(
            StallingBackend {
                gate: Arc::clone(&gate),
            },
            Arc::clone(&transcript),
        ));

        let first = {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.submit("first").await })
        };

        while !handler.is_busy() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(handler.submit("second").await, SubmitOutcome::Rejected);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Answered);

        let transcript = transcript.lock().await;
        // The rejected submit left no trace
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "first");
        assert!(!transcript.is_pending());
        assert!(!handler.is_busy());
    }
}
