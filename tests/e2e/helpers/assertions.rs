use serde_json::Value;

pub fn assert_convert_response(body: &Value, expected_title: &str, expected_voice: &str) {
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .expect("Missing id field");

    assert_eq!(body.get("title").and_then(|v| v.as_str()), Some(expected_title));
    assert_eq!(body.get("voice").and_then(|v| v.as_str()), Some(expected_voice));
    assert!(body.get("created_at").and_then(|v| v.as_str()).is_some());
    assert!(body.get("text_length").and_then(|v| v.as_i64()).is_some());
    assert_eq!(
        body.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/api/conversions/{}/audio", id).as_str())
    );
    assert_eq!(
        body.get("video_url").and_then(|v| v.as_str()),
        Some(format!("/api/conversions/{}/video", id).as_str())
    );
}

pub fn assert_conversion_summary(entry: &Value) {
    for field in ["id", "title", "created_at", "voice", "status", "text_length"] {
        assert!(entry.get(field).is_some(), "Missing '{}' field", field);
    }
    assert!(entry.get("audio_url").is_some(), "Missing 'audio_url' field");
    assert!(entry.get("video_url").is_some(), "Missing 'video_url' field");
    assert!(entry.get("error_message").is_some(), "Missing 'error_message' field");
}
