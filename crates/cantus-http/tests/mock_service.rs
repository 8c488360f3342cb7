//! Mock service tests for the cantus HTTP client.
//!
//! These tests use wiremock to stand in for both the identity provider and
//! the application API, so they run without network access or a real cookie.

use cantus_core::error::{AuthError, Error};
use cantus_core::{
    Cookie, ExtendClipPayload, GenerateClipPayload, GenerateLyricsPayload, PollOptions,
    SleepRange, Status,
};
use cantus_http::{ClientConfig, DEFAULT_CLERK_JS_VERSION, GenerationClient};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIE: &str = "__client=test-client; __session=test-session";

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url(&format!("{}/api", server.uri()))
        .unwrap()
        .with_clerk_base_url(&format!("{}/v1/client", server.uri()))
        .unwrap()
}

fn client_for(server: &MockServer) -> GenerationClient {
    GenerationClient::with_config(Cookie::new(COOKIE), config_for(server)).unwrap()
}

/// Mount the two identity provider calls, expecting `times` exchanges.
async fn mount_clerk(server: &MockServer, jwt: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .and(query_param("_clerk_js_version", DEFAULT_CLERK_JS_VERSION))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "id": "client_1",
                "last_active_session_id": "sess_1"
            }
        })))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/client/sessions/sess_1/tokens"))
        .and(query_param("_clerk_js_version", DEFAULT_CLERK_JS_VERSION))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "token",
            "jwt": jwt
        })))
        .expect(times)
        .mount(server)
        .await;
}

fn fast(options: PollOptions) -> PollOptions {
    options.with_sleep_range(SleepRange::fixed(0))
}

fn clip_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "title": "Sea Shanty",
        "audio_url": if status == "complete" { json!(format!("https://cdn1.suno.ai/{id}.mp3")) } else { json!("") },
        "metadata": { "tags": "folk", "gpt_description_prompt": "a sea shanty" },
        "created_at": "2024-05-06T12:30:00.000Z"
    })
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_authenticate_exchanges_cookie_for_token() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("c1", "complete")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clip = client.get_clip("c1").await.unwrap();
    assert_eq!(clip.status, Status::Complete);
    assert_eq!(clip.audio_url.as_deref(), Some("https://cdn1.suno.ai/c1.mp3"));
    assert_eq!(clip.metadata.gpt_description_prompt.as_deref(), Some("a sea shanty"));
}

#[tokio::test]
async fn test_authenticate_without_active_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": null })))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::NoActiveSession)));
}

#[tokio::test]
async fn test_authenticate_without_jwt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "last_active_session_id": "sess_1" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/client/sessions/sess_1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "token" })))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
}

#[tokio::test]
async fn test_first_request_authenticates_on_401_and_replays() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    // Mounted first, so it wins once the token is attached.
    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("c1", "streaming")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let clip = client_for(&server).get_clip("c1").await.unwrap();
    assert_eq!(clip.status, Status::Streaming);
}

#[tokio::test]
async fn test_persistent_401_is_propagated_after_one_replay() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/billing/info/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client_for(&server).get_billing_info().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_failed_reauthentication_is_wrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .respond_with(ResponseTemplate::new(500).set_body_string("identity down"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_clip("c1").await.unwrap_err();
    match err {
        Error::Reauth(inner) => {
            assert_eq!(inner.status(), Some(500));
            assert!(inner.to_string().contains("identity down"));
        }
        other => panic!("expected reauth failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_cookie_is_sent_verbatim_on_both_calls() {
    let server = MockServer::start().await;

    // A rotated cookie from the identity provider is not carried forward.
    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .and(header("cookie", COOKIE))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "__client_uat=1700000000; Path=/")
                .set_body_json(json!({
                    "response": { "last_active_session_id": "sess_1" }
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/client/sessions/sess_1/tokens"))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jwt": "jwt-1" })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).authenticate().await.unwrap();
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 0).await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_clip("c1").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let err = client.get_clip("c1").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

// ============================================================================
// Generation Tests
// ============================================================================

#[tokio::test]
async fn test_generate_clips_without_wait_returns_created() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/v2/"))
        .and(header("authorization", "Bearer jwt-1"))
        .and(body_partial_json(json!({
            "prompt": "a sea shanty",
            "gpt_description_prompt": "a sea shanty",
            "mv": "chirp-v3-5",
            "make_instrumental": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "batch_1",
            "clips": [clip_json("c1", "submitted"), clip_json("c2", "submitted")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clips = client
        .generate_clips(
            &GenerateClipPayload::new("a sea shanty"),
            &PollOptions::for_clips().no_wait(),
        )
        .await
        .unwrap();

    assert_eq!(clips.len(), 2);
    assert!(clips.iter().all(|c| c.status == Status::Submitted));
}

#[tokio::test]
async fn test_generate_clips_polls_feed_until_complete() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/v2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clips": [clip_json("c1", "submitted"), clip_json("c2", "submitted")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed/v2"))
        .and(query_param("ids", "c1,c2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([clip_json("c1", "streaming"), clip_json("c2", "queued")])),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed/v2"))
        .and(query_param("ids", "c1,c2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([clip_json("c1", "complete"), clip_json("c2", "complete")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clips = client
        .generate_clips(
            &GenerateClipPayload::new("a sea shanty"),
            &fast(PollOptions::for_clips()),
        )
        .await
        .unwrap();

    assert_eq!(clips.len(), 2);
    assert!(clips.iter().all(|c| c.status == Status::Complete));
    assert_eq!(clips[1].audio_url.as_deref(), Some("https://cdn1.suno.ai/c2.mp3"));
}

#[tokio::test]
async fn test_generate_clips_with_no_created_clips_skips_feed() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/v2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clips": [] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed/v2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([clip_json("old1", "complete")])),
        )
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clips = client
        .generate_clips(
            &GenerateClipPayload::new("a sea shanty"),
            &fast(PollOptions::for_clips()),
        )
        .await
        .unwrap();

    assert!(clips.is_empty());
}

#[tokio::test]
async fn test_generate_clips_custom_mode_skips_description() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/v2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clips": [clip_json("c1", "submitted")]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let payload = GenerateClipPayload::new("[Verse]\nHaul away")
        .with_tags("folk")
        .with_title("Haul Away");
    client
        .generate_clips(&payload, &PollOptions::for_clips().no_wait())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/api/generate/v2/")
        .unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["tags"], "folk");
    assert_eq!(body["title"], "Haul Away");
    assert!(body.get("gpt_description_prompt").is_none());
}

#[tokio::test]
async fn test_extend_clip_waits_for_streaming() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/v2/"))
        .and(body_partial_json(json!({
            "prompt": "keep going",
            "continue_clip_id": "c1",
            "continue_at": "00:30"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("e1", "submitted")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clip/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("e1", "streaming")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let payload = ExtendClipPayload::new("c1", GenerateClipPayload::new("keep going")).at("00:30");
    let clip = client
        .extend_clip(&payload, &fast(PollOptions::for_extend()))
        .await
        .unwrap();

    assert_eq!(clip.id, "e1");
    assert_eq!(clip.status, Status::Streaming);
}

#[tokio::test]
async fn test_concatenate_sends_wire_keys() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/concat/v2/"))
        .and(body_json(json!({ "clip_id": "e1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("full1", "queued")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clip = client.concatenate("e1").await.unwrap();
    assert_eq!(clip.id, "full1");
    assert_eq!(clip.status, Status::Queued);
}

// ============================================================================
// Lyrics Tests
// ============================================================================

#[tokio::test]
async fn test_generate_lyrics_waits_and_reflows() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/lyrics/"))
        .and(body_json(json!({ "prompt": "a song about the tide" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "",
            "title": "",
            "status": "running"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "[Verse]\n\nThe tide comes in\n\n\nThe tide goes out\n",
            "title": "Tide",
            "status": "complete"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let lyrics = client
        .generate_lyrics(
            &GenerateLyricsPayload::new("a song about the tide"),
            &fast(PollOptions::for_lyrics()),
        )
        .await
        .unwrap();

    assert_eq!(lyrics.id, "l1");
    assert_eq!(lyrics.title, "Tide");
    assert_eq!(lyrics.status, Status::Complete);
    assert_eq!(lyrics.text, "[Verse]\nThe tide comes in\nThe tide goes out");
}

#[tokio::test]
async fn test_get_lyrics_with_null_text() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": null,
            "title": null,
            "status": "complete"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let lyrics = client.get_lyrics("l1").await.unwrap();
    assert_eq!(lyrics.id, "l1");
    assert_eq!(lyrics.text, "");
    assert_eq!(lyrics.title, "");
    assert_eq!(lyrics.status, Status::Complete);
}

#[tokio::test]
async fn test_generate_lyrics_keeps_polling_through_null_text() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/lyrics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l3" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": null,
            "title": null,
            "status": "running"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "Low tide\n\nHigh tide",
            "title": "Tides",
            "status": "complete"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let lyrics = client
        .generate_lyrics(
            &GenerateLyricsPayload::new("tides"),
            &fast(PollOptions::for_lyrics()),
        )
        .await
        .unwrap();

    assert_eq!(lyrics.status, Status::Complete);
    assert_eq!(lyrics.text, "Low tide\nHigh tide");
}

#[tokio::test]
async fn test_generate_lyrics_without_wait_returns_placeholder() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/generate/lyrics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l2" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/generate/lyrics/l2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let lyrics = client
        .generate_lyrics(
            &GenerateLyricsPayload::new("anything"),
            &PollOptions::for_lyrics().no_wait(),
        )
        .await
        .unwrap();

    assert_eq!(lyrics.id, "l2");
    assert_eq!(lyrics.status, Status::Error);
    assert_eq!(lyrics.text, "Can not generate lyrics");
}

// ============================================================================
// Read-only Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_clip_with_null_metadata() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "status": "queued",
            "metadata": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clip = client.get_clip("c1").await.unwrap();
    assert_eq!(clip.status, Status::Queued);
    assert!(clip.metadata.tags.is_none());
}

#[tokio::test]
async fn test_billing_info_is_caller_cased() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/billing/info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_credits_left": 50,
            "monthly_limit": 50,
            "plan": { "plan_key": "free" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let billing = client.get_billing_info().await.unwrap();
    assert_eq!(billing["totalCreditsLeft"], 50);
    assert_eq!(billing["plan"]["planKey"], "free");
}

#[tokio::test]
async fn test_feed_without_ids_sends_no_query() {
    let server = MockServer::start().await;
    mount_clerk(&server, "jwt-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/feed/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clips": [clip_json("c9", "complete")]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let clips = client.get_feed(&[]).await.unwrap();
    assert_eq!(clips.len(), 1);

    let requests = server.received_requests().await.unwrap();
    let feed = requests
        .iter()
        .find(|r| r.url.path() == "/api/feed/v2")
        .unwrap();
    assert!(feed.url.query().is_none());
}

#[tokio::test]
async fn test_user_agent_is_sent_everywhere() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .and(header("user-agent", "cantus-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "last_active_session_id": "sess_1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/client/sessions/sess_1/tokens"))
        .and(header("user-agent", "cantus-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jwt": "jwt-ua" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clip/c1"))
        .and(header("user-agent", "cantus-test/1.0"))
        .and(header("authorization", "Bearer jwt-ua"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clip_json("c1", "complete")))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_user_agent("cantus-test/1.0");
    let client = GenerationClient::with_config(Cookie::new(COOKIE), config).unwrap();
    client.authenticate().await.unwrap();
    client.get_clip("c1").await.unwrap();
}
