use crate::e2e::helpers;

use chrono::Utc;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use texttovideo_backend::domain::conversion::ConversionStatus;
use uuid::Uuid;

async fn convert(ctx: &TestContext, title: &str) -> Uuid {
    let response = ctx
        .client
        .post(
            "/api/convert",
            &json!({ "text": "Downloadable words.", "voice": "en-US", "title": title }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    response
        .body
        .as_ref()
        .and_then(|b| b.get("id"))
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_audio_as_attachment(ctx: &TestContext) {
    let id = convert(ctx, "My Talk: part-2!").await;

    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/audio", id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"My_Talk__part-2_.mp3\"",
        );
    assert_eq!(&response.body_bytes[..4], &[0xFF, 0xFB, 0x90, 0x00]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_video_as_attachment(ctx: &TestContext) {
    let id = convert(ctx, "Ação rápida").await;

    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/video", id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "video/mp4")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"A__o_r_pida.mp4\"",
        );
    assert!(response.body_bytes.starts_with(b"FAKE-MP4|"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_conversion(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/video", Uuid::new_v4()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Resource not found: Conversion not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_without_recorded_filename(ctx: &TestContext) {
    let failed = ctx
        .fixtures
        .create_conversion("Broken", ConversionStatus::Failed, None, None, Utc::now())
        .await
        .unwrap();

    for kind in ["audio", "video"] {
        let response = ctx
            .client
            .get(&format!("/api/conversions/{}/{}", failed.id, kind))
            .await
            .unwrap();
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_file_is_missing(ctx: &TestContext) {
    let conversion = ctx
        .fixtures
        .create_conversion(
            "Gone",
            ConversionStatus::Completed,
            Some("missing.mp3"),
            Some("present.mp4"),
            Utc::now(),
        )
        .await
        .unwrap();
    ctx.fixtures
        .write_artifact("video", "present.mp4", b"video bytes")
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/audio", conversion.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/video", conversion.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body_bytes, b"video bytes");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_serve_files_outside_the_storage_root(ctx: &TestContext) {
    let conversion = ctx
        .fixtures
        .create_conversion(
            "Sneaky",
            ConversionStatus::Completed,
            Some("../../etc/passwd"),
            None,
            Utc::now(),
        )
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/conversions/{}/audio", conversion.id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_ids(ctx: &TestContext) {
    let response = ctx.client.get("/api/conversions/not-a-uuid/audio").await.unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
}
