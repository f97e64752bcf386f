use log::{debug, error};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::{ChatRequest, Segment};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Answer a question about a transcript via the generative upstream.
///
/// Each call is stateless: only the grounding transcript and the single user
/// message go upstream, never prior turns. That matches the existing contract;
/// multi-turn context would be a new entry point, not a change here.
pub async fn answer(client: &reqwest::Client, config: &Config, request: &ChatRequest) -> Result<String> {
    validate(request)?;

    let api_key = config.gemini_api_key()?;
    let model = config.gemini_model();

    let transcript_text = grounding_text(&request.transcript);
    let system_prompt = build_system_prompt(&request.video_title, &transcript_text);

    debug!(
        "Answering via {model}: {} chars grounding, message {:?}",
        transcript_text.len(),
        request.message
    );

    let url = format!("{GEMINI_BASE_URL}/{model}:generateContent");
    let body = serde_json::json!({
        "systemInstruction": {
            "parts": [{"text": system_prompt}]
        },
        "contents": [{
            "role": "user",
            "parts": [{"text": request.message}]
        }]
    });

    let resp = client
        .post(&url)
        .query(&[("key", api_key.as_str())])
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            error!("Chat request failed: {e}");
            classify_error_text(&e.to_string())
        })?;

    let status = resp.status();
    if !status.is_success() {
        // Classified by body content; the body itself stays in the log
        let body = resp.text().await.unwrap_or_default();
        error!("Generative upstream returned {status}: {body}");
        return Err(classify_error_text(&body));
    }

    let json: Value = resp.json().await.map_err(|e| {
        error!("Generative response was not valid JSON: {e}");
        ServiceError::GenerationFailed
    })?;

    extract_answer_text(&json).ok_or(ServiceError::EmptyResponse)
}

/// Reject empty input before anything goes on the wire
fn validate(request: &ChatRequest) -> Result<()> {
    if request.message.trim().is_empty() || request.transcript.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Message and transcript are required".to_string(),
        ));
    }
    Ok(())
}

/// The grounding document: segment texts space-joined in original order
pub fn grounding_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ")
}

fn build_system_prompt(video_title: &str, transcript_text: &str) -> String {
    format!(
        "You are a transcript assistant for a YouTube video titled \"{video_title}\". \
Help users understand and analyze the video based EXCLUSIVELY on the transcript below.\n\n\
TRANSCRIPT CONTENT:\n{transcript_text}\n\n\
INSTRUCTIONS:\n\
1. Answer only from the transcript content above.\n\
2. If information is not in the transcript, say so plainly instead of guessing.\n\
3. Do not bring in outside knowledge about the video or its topic.\n\
4. Summarize, explain, or analyze the content as the question requires.\n\
5. Use clear, conversational language."
    )
}

/// Map an upstream error message to the failure taxonomy by its indicators
fn classify_error_text(text: &str) -> ServiceError {
    if text.contains("API_KEY") || text.contains("API key") {
        ServiceError::AuthError
    } else if text.contains("QUOTA") {
        ServiceError::QuotaExceeded
    } else if text.contains("SAFETY") {
        ServiceError::ContentFiltered
    } else {
        ServiceError::GenerationFailed
    }
}

fn extract_answer_text(json: &Value) -> Option<String> {
    let parts = json
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() { None } else { Some(text) }
}
