pub mod chat;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod transcript;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timed chunk of spoken text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Complete transcript for a video.
///
/// Serializes with the segments under `transcript`, matching the upstream
/// response body, so this doubles as the wire type for the extract contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "transcript")]
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl Transcript {
    /// Title to present and to ground chat answers against
    pub fn title(&self) -> &str {
        self.video_title.as_deref().unwrap_or("YouTube Video")
    }
}

/// Request body for the transcript extraction contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Request body for the chat contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub transcript: Vec<Segment>,
    #[serde(rename = "videoTitle")]
    pub video_title: String,
}

/// Response body for the chat contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a session's chat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Extract video ID from the accepted YouTube URL shapes.
///
/// Patterns are tried in order, first match wins. The ID runs up to the
/// first `&`, newline, `?`, or `#`.
pub fn extract_video_id(url: &str) -> Option<String> {
    const PATTERNS: [&str; 2] = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
        r"youtube\.com/watch\?.*v=([^&\n?#]+)",
    ];

    for pattern in PATTERNS {
        let re = regex::Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(url) {
            return Some(caps[1].to_string());
        }
    }

    None
}
