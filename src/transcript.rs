use log::{debug, error};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::{Segment, Transcript, extract_video_id};

const UPSTREAM_HOST: &str = "youtube-2-transcript.p.rapidapi.com";

/// Fetch a transcript for a YouTube URL from the upstream transcript API.
///
/// The URL is re-validated here so a bad one fails before any outbound call.
pub async fn fetch(client: &reqwest::Client, config: &Config, url: &str) -> Result<Transcript> {
    let video_id = extract_video_id(url)
        .ok_or_else(|| ServiceError::InvalidInput("Invalid YouTube URL".to_string()))?;

    let api_key = config.rapidapi_key()?;

    debug!("Fetching transcript for video {video_id}");

    let endpoint = format!("https://{UPSTREAM_HOST}/transcript-with-url");
    let resp = client
        .get(&endpoint)
        .query(&[("url", url), ("flat_text", "false")])
        .header("x-rapidapi-host", UPSTREAM_HOST)
        .header("x-rapidapi-key", &api_key)
        .send()
        .await
        .map_err(|e| {
            error!("Transcript request failed: {e}");
            ServiceError::InternalError
        })?;

    let status = resp.status();
    if !status.is_success() {
        // Raw upstream bodies go to the log only, never to the caller
        let body = resp.text().await.unwrap_or_default();
        error!("Transcript upstream returned {status}: {body}");
        return Err(classify_status(status));
    }

    let json: Value = resp.json().await.map_err(|e| {
        error!("Transcript response was not valid JSON: {e}");
        ServiceError::InternalError
    })?;

    parse_response(&json, &video_id)
}

fn classify_status(status: StatusCode) -> ServiceError {
    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited,
        _ => ServiceError::UpstreamError { status },
    }
}

/// Normalize the upstream body into a [`Transcript`].
///
/// The `transcript` field must be an array and every element must carry
/// `text`, `start`, and `duration`; anything else fails whole, a partially
/// populated transcript is never returned.
fn parse_response(json: &Value, video_id: &str) -> Result<Transcript> {
    let items = json
        .get("transcript")
        .and_then(Value::as_array)
        .ok_or(ServiceError::NoTranscriptData)?;

    let mut segments = Vec::with_capacity(items.len());
    for item in items {
        let text = item.get("text").and_then(Value::as_str);
        let start = item.get("start").and_then(Value::as_f64);
        let duration = item.get("duration").and_then(Value::as_f64);
        match (text, start, duration) {
            (Some(text), Some(start), Some(duration)) => segments.push(Segment {
                text: text.to_string(),
                start,
                duration,
            }),
            _ => return Err(ServiceError::NoTranscriptData),
        }
    }

    let video_title = json
        .get("video_title")
        .and_then(Value::as_str)
        .map(str::to_string);
    let upstream_id = json
        .get("video_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Transcript {
        segments,
        video_title,
        video_id: upstream_id.or_else(|| Some(video_id.to_string())),
    })
}
