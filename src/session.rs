use crate::error::ServiceError;
use crate::{ChatMessage, ChatRequest, Transcript, extract_video_id};

/// Fallback shown in place of a raw error when a chat turn fails
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I apologize, but I encountered an error while processing your question. Please try again.";

/// Phase of the transcript extraction flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractState {
    #[default]
    Idle,
    Extracting,
    Extracted,
    Failed(String),
}

/// Transient notice for the presentation layer; `destructive` marks failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub destructive: bool,
}

impl Notice {
    fn info(text: &str) -> Self {
        Self {
            text: text.to_string(),
            destructive: false,
        }
    }

    fn destructive(text: &str) -> Self {
        Self {
            text: text.to_string(),
            destructive: true,
        }
    }
}

/// In-memory state for one user session.
///
/// Single owner, single writer. Holds at most one transcript; chat messages
/// exist only while a transcript does, and replacing or clearing the
/// transcript clears the chat with it. At most one extraction and one chat
/// call may be in flight, gated by the state here, not by queuing.
#[derive(Debug, Default)]
pub struct Session {
    state: ExtractState,
    transcript: Option<Transcript>,
    messages: Vec<ChatMessage>,
    chat_open: bool,
    chat_sending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ExtractState {
        &self.state
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn is_sending(&self) -> bool {
        self.chat_sending
    }

    /// Chat is usable only once a transcript exists
    pub fn can_chat(&self) -> bool {
        self.transcript.is_some()
    }

    /// Validate a submitted URL and move to `Extracting` if it is usable.
    ///
    /// Empty or invalid input is resolved locally: the state records an
    /// inline error and `false` says no fetch may be made.
    pub fn submit_url(&mut self, url: &str) -> bool {
        if self.state == ExtractState::Extracting {
            return false;
        }
        if url.trim().is_empty() {
            self.state = ExtractState::Failed("Please enter a YouTube URL".to_string());
            return false;
        }
        if extract_video_id(url).is_none() {
            self.state = ExtractState::Failed("Please enter a valid YouTube URL".to_string());
            return false;
        }

        // A new submission replaces the transcript, which invalidates the chat
        self.transcript = None;
        self.messages.clear();
        self.chat_open = false;
        self.state = ExtractState::Extracting;
        true
    }

    /// Record the outcome of the in-flight fetch
    pub fn finish_extract(&mut self, result: Result<Transcript, ServiceError>) -> Notice {
        match result {
            Ok(transcript) => {
                self.transcript = Some(transcript);
                self.state = ExtractState::Extracted;
                Notice::info("Transcript extracted successfully")
            }
            Err(err) => {
                self.state = ExtractState::Failed(err.to_string());
                Notice::destructive("Failed to extract transcript")
            }
        }
    }

    /// Inline error to display, if the extraction flow failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ExtractState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Open the chat view with a fresh, empty message log
    pub fn start_new_chat(&mut self) -> bool {
        if self.transcript.is_none() {
            return false;
        }
        self.messages.clear();
        self.chat_open = true;
        true
    }

    /// Accept a composed message: append it optimistically as a `user` turn
    /// and hand back the request to send. `None` means nothing may go out
    /// (no transcript, chat closed, a call already in flight, empty input).
    pub fn begin_send(&mut self, input: &str) -> Option<ChatRequest> {
        let message = input.trim();
        if message.is_empty() || self.chat_sending || !self.chat_open {
            return None;
        }
        let transcript = self.transcript.as_ref()?;

        let request = ChatRequest {
            message: message.to_string(),
            transcript: transcript.segments.clone(),
            video_title: transcript.title().to_string(),
        };

        self.messages.push(ChatMessage::user(message));
        self.chat_sending = true;
        Some(request)
    }

    /// Record the outcome of the in-flight chat call. Failures append a fixed
    /// apology as the assistant turn; the raw error only reaches the notice log.
    pub fn finish_send(&mut self, result: Result<String, ServiceError>) -> Option<Notice> {
        self.chat_sending = false;
        match result {
            Ok(text) => {
                self.messages.push(ChatMessage::assistant(text));
                None
            }
            Err(_) => {
                self.messages.push(ChatMessage::assistant(CHAT_FALLBACK_MESSAGE));
                Some(Notice::destructive("Failed to get AI response"))
            }
        }
    }

    /// Drop everything: transcript, chat, and any recorded error
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, Segment};
    use reqwest::StatusCode;

    fn sample_transcript() -> Transcript {
        Transcript {
            segments: vec![
                Segment {
                    text: "Hello".to_string(),
                    start: 0.0,
                    duration: 1.5,
                },
                Segment {
                    text: "world".to_string(),
                    start: 1.5,
                    duration: 2.0,
                },
            ],
            video_title: Some("Test Video".to_string()),
            video_id: Some("abc123".to_string()),
        }
    }

    fn extracted_session() -> Session {
        let mut session = Session::new();
        assert!(session.submit_url("https://www.youtube.com/watch?v=abc123"));
        session.finish_extract(Ok(sample_transcript()));
        session
    }

    #[test]
    fn test_valid_url_extracts_and_enables_chat() {
        let mut session = Session::new();
        assert!(session.submit_url("https://www.youtube.com/watch?v=abc123"));
        assert_eq!(*session.state(), ExtractState::Extracting);
        assert!(!session.can_chat());

        let notice = session.finish_extract(Ok(sample_transcript()));
        assert_eq!(*session.state(), ExtractState::Extracted);
        assert!(session.can_chat());
        assert!(!notice.destructive);
        assert_eq!(session.transcript().unwrap().segments.len(), 2);
    }

    #[test]
    fn test_empty_url_is_local_error() {
        let mut session = Session::new();
        assert!(!session.submit_url("   "));
        assert_eq!(session.error(), Some("Please enter a YouTube URL"));
    }

    #[test]
    fn test_invalid_url_is_local_error() {
        let mut session = Session::new();
        assert!(!session.submit_url("not-a-url"));
        assert_eq!(session.error(), Some("Please enter a valid YouTube URL"));
        assert!(session.transcript().is_none());
    }

    #[test]
    fn test_failed_extract_shows_inline_error() {
        let mut session = Session::new();
        assert!(session.submit_url("https://youtu.be/abc123"));
        let notice = session.finish_extract(Err(ServiceError::NotFound));
        assert!(notice.destructive);
        assert_eq!(session.error(), Some("No transcript available for this video"));
        assert!(!session.can_chat());
    }

    #[test]
    fn test_chat_requires_transcript() {
        let mut session = Session::new();
        assert!(!session.start_new_chat());
        assert!(session.begin_send("hello").is_none());
    }

    #[test]
    fn test_chat_turn_appends_user_then_assistant() {
        let mut session = extracted_session();
        assert!(session.start_new_chat());

        let request = session.begin_send("What is this about?").unwrap();
        assert_eq!(request.message, "What is this about?");
        assert_eq!(request.video_title, "Test Video");
        assert_eq!(request.transcript.len(), 2);
        assert!(session.is_sending());

        session.finish_send(Ok("A greeting.".to_string()));
        assert!(!session.is_sending());

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "What is this about?");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "A greeting.");
        assert!(messages[1].timestamp >= messages[0].timestamp);
        assert_ne!(messages[0].id, messages[1].id);
    }

    #[test]
    fn test_chat_failure_appends_apology_and_notice() {
        let mut session = extracted_session();
        session.start_new_chat();
        session.begin_send("What is this about?").unwrap();

        let notice = session.finish_send(Err(ServiceError::QuotaExceeded)).unwrap();
        assert!(notice.destructive);

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, CHAT_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_quota_error_maps_to_429() {
        assert_eq!(ServiceError::QuotaExceeded.http_status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_one_chat_call_in_flight() {
        let mut session = extracted_session();
        session.start_new_chat();
        assert!(session.begin_send("first").is_some());
        assert!(session.begin_send("second").is_none());

        session.finish_send(Ok("answer".to_string()));
        assert!(session.begin_send("second").is_some());
    }

    #[test]
    fn test_empty_message_not_sent() {
        let mut session = extracted_session();
        session.start_new_chat();
        assert!(session.begin_send("   ").is_none());
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_new_chat_clears_previous_messages() {
        let mut session = extracted_session();
        session.start_new_chat();
        session.begin_send("hi").unwrap();
        session.finish_send(Ok("hello".to_string()));
        assert_eq!(session.messages().len(), 2);

        assert!(session.start_new_chat());
        assert!(session.messages().is_empty());
        assert!(session.is_chat_open());
    }

    #[test]
    fn test_new_submission_invalidates_chat() {
        let mut session = extracted_session();
        session.start_new_chat();
        session.begin_send("hi").unwrap();
        session.finish_send(Ok("hello".to_string()));

        assert!(session.submit_url("https://youtu.be/other456"));
        assert!(session.messages().is_empty());
        assert!(!session.is_chat_open());
        assert!(session.transcript().is_none());
    }

    #[test]
    fn test_no_resubmit_while_extracting() {
        let mut session = Session::new();
        assert!(session.submit_url("https://youtu.be/abc123"));
        assert!(!session.submit_url("https://youtu.be/abc123"));
    }

    #[test]
    fn test_chat_closed_blocks_send() {
        let mut session = extracted_session();
        assert!(session.begin_send("hello").is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = extracted_session();
        session.start_new_chat();
        session.begin_send("hi").unwrap();
        session.finish_send(Ok("hello".to_string()));

        session.clear();
        assert_eq!(*session.state(), ExtractState::Idle);
        assert!(session.transcript().is_none());
        assert!(session.messages().is_empty());
        assert!(!session.is_chat_open());
    }

    #[test]
    fn test_video_title_falls_back_when_absent() {
        let mut session = Session::new();
        session.submit_url("https://youtu.be/abc123");
        session.finish_extract(Ok(Transcript {
            segments: sample_transcript().segments,
            video_title: None,
            video_id: None,
        }));
        session.start_new_chat();

        let request = session.begin_send("title?").unwrap();
        assert_eq!(request.video_title, "YouTube Video");
    }
}
