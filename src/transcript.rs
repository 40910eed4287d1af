use crate::message::Message;

/// Append-only message history plus the transient pending indicator shown
/// while a request is outstanding. At most one indicator exists at a time and
/// it is never part of the history.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    pending: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replaces any previous indicator, so there can never be two.
    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.pending = Some(text.into());
    }

    /// No-op when no indicator is present.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("first"));
        transcript.push(Message::bot("second"));
        transcript.push(Message::user("third"));

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.last().unwrap().sender, Sender::User);
    }

    #[test]
    fn test_set_pending_replaces_previous_indicator() {
        let mut transcript = Transcript::new();
        transcript.set_pending("thinking");
        transcript.set_pending("still thinking");
        assert_eq!(transcript.pending(), Some("still thinking"));
    }

    #[test]
    fn test_clear_pending_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.clear_pending();
        assert!(!transcript.is_pending());

        transcript.set_pending("thinking");
        transcript.clear_pending();
        transcript.clear_pending();
        assert!(!transcript.is_pending());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_pending_is_not_part_of_history() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("hello"));
        transcript.set_pending("thinking");
        assert_eq!(transcript.len(), 1);
    }
}
