use crate::Transcript;

/// Render transcript as plain text (segments space-joined, no timestamps)
pub fn render_text(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render transcript with an `m:ss` start offset per segment
pub fn render_timestamps(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| format!("[{}] {}", format_time(s.start), s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render transcript in the wire shape of the extract contract
pub fn render_json(transcript: &Transcript) -> String {
    serde_json::to_string_pretty(transcript).unwrap_or_default()
}

fn format_time(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Segment;

    fn sample_transcript() -> Transcript {
        Transcript {
            segments: vec![
                Segment {
                    text: "Hello world".to_string(),
                    start: 0.0,
                    duration: 1.5,
                },
                Segment {
                    text: "This is a test".to_string(),
                    start: 75.4,
                    duration: 2.0,
                },
            ],
            video_title: Some("Test Video".to_string()),
            video_id: Some("test123".to_string()),
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&sample_transcript()), "Hello world This is a test");
    }

    #[test]
    fn test_render_text_empty() {
        let t = Transcript {
            segments: vec![],
            video_title: None,
            video_id: None,
        };
        assert_eq!(render_text(&t), "");
    }

    #[test]
    fn test_render_timestamps() {
        let output = render_timestamps(&sample_transcript());
        assert_eq!(output, "[0:00] Hello world\n[1:15] This is a test");
    }

    #[test]
    fn test_render_json_wire_shape() {
        let output = render_json(&sample_transcript());
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["transcript"].as_array().unwrap().len(), 2);
        assert_eq!(json["video_title"], "Test Video");
        assert_eq!(json["video_id"], "test123");
    }

    #[test]
    fn test_format_time_padding() {
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(615.0), "10:15");
    }
}
