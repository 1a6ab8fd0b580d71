use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dubbing_application::{
    ApplicationError, CommandService, DubVideoCommand, DubVideoCommandHandler, DubVideoRequest,
    DubVideoResponse, DubVideoUseCase,
};
use dubbing_domain::DomainError;
use dubbing_http_server::{create_router, AppState};
use reqwest::{header, redirect::Policy, StatusCode};

/// Fails on links that name a failure mode, otherwise records the request.
#[derive(Default)]
struct ScriptedUseCase {
    received: Mutex<Vec<DubVideoRequest>>,
}

#[async_trait]
impl DubVideoUseCase for ScriptedUseCase {
    async fn dub_video(
        &self,
        request: DubVideoRequest,
    ) -> Result<DubVideoResponse, ApplicationError> {
        if request.link.contains("no-captions") {
            return Err(DomainError::transcript_unavailable("no captions").into());
        }
        if request.link.contains("broken-download") {
            return Err(DomainError::external_service_error(
                "ytdlp",
                "Error downloading video: exit status 1",
            )
            .into());
        }

        self.received
            .lock()
            .expect("lock")
            .push(request.clone());
        Ok(DubVideoResponse {
            session_id: "session-1".to_string(),
            video_id: "abc".to_string(),
            target_lang: request.target_lang,
            sentence_count: 2,
            silent_sentence_count: 0,
            timeline_duration_ms: 5_000,
            output_path: Some("final_video.mp4".to_string()),
        })
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    usecase: Arc<ScriptedUseCase>,
    output_path: PathBuf,
    _dir: tempfile::TempDir,
}

async fn start_server() -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let output_path = dir.path().join("final_video.mp4");
    let usecase = Arc::new(ScriptedUseCase::default());
    let handler = Arc::new(DubVideoCommandHandler::new(usecase.clone()));
    let command_service: CommandService<DubVideoCommand> = CommandService::new(handler);
    let state = AppState::new(Arc::new(command_service), output_path.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("extract local address");
    tokio::spawn(async move {
        axum::serve(listener, create_router(state))
            .await
            .expect("server should run");
    });

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client");
    TestServer {
        base_url: format!("http://{addr}"),
        client,
        usecase,
        output_path,
        _dir: dir,
    }
}

async fn submit(server: &TestServer, form_body: &str) -> reqwest::Response {
    server
        .client
        .post(format!("{}/", server.base_url))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body.to_string())
        .send()
        .await
        .expect("request")
}

#[tokio::test]
async fn index_serves_the_form() {
    let server = start_server().await;

    let response = server
        .client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.expect("body");
    assert!(page.contains(r#"<select id="target_lang" name="target_lang">"#));
    assert!(page.contains(r#"<option value="es_XX">"#));
}

#[tokio::test]
async fn successful_dub_redirects_to_download() {
    let server = start_server().await;

    let response = submit(
        &server,
        "link=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc&target_lang=es_XX",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/play_audio")
    );
    let received = server.usecase.received.lock().expect("lock").clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].link, "https://www.youtube.com/watch?v=abc");
    assert_eq!(received[0].target_lang, "es_XX");
}

#[tokio::test]
async fn missing_transcript_is_reported_as_plain_text() {
    let server = start_server().await;

    let response = submit(
        &server,
        "link=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dno-captions&target_lang=fr_XX",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.expect("body"),
        "Error: Unable to fetch transcript from YouTube. no captions"
    );
}

#[tokio::test]
async fn download_failure_is_an_internal_error() {
    let server = start_server().await;

    let response = submit(
        &server,
        "link=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dbroken-download&target_lang=de_DE",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.expect("body"),
        "Error downloading video: exit status 1"
    );
}

#[tokio::test]
async fn unsupported_language_is_rejected_before_the_pipeline() {
    let server = start_server().await;

    let response = submit(
        &server,
        "link=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc&target_lang=xx_XX",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .await
        .expect("body")
        .contains("unsupported target language"));
    assert!(server.usecase.received.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn play_audio_is_not_found_before_any_output() {
    let server = start_server().await;

    let response = server
        .client
        .get(format!("{}/play_audio", server.base_url))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn play_audio_serves_output_as_attachment() {
    let server = start_server().await;
    std::fs::write(&server.output_path, b"fake mp4").expect("write output");

    let response = server
        .client
        .get(format!("{}/play_audio", server.base_url))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
        Some(r#"attachment; filename="final_video.mp4""#)
    );
    assert_eq!(response.bytes().await.expect("body").as_ref(), b"fake mp4");
}

#[tokio::test]
async fn large_output_is_streamed_whole_with_its_length() {
    let server = start_server().await;
    let video: Vec<u8> = (0..3 * 1024 * 1024).map(|i: u32| (i % 251) as u8).collect();
    std::fs::write(&server.output_path, &video).expect("write output");

    let response = server
        .client
        .get(format!("{}/play_audio", server.base_url))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok()),
        Some("3145728")
    );
    let body = response.bytes().await.expect("body");
    assert_eq!(body.len(), video.len());
    assert!(body.as_ref() == video.as_slice());
}

#[tokio::test]
async fn health_reports_ok() {
    let server = start_server().await;

    let body: serde_json::Value = server
        .client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}
