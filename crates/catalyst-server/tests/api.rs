//! HTTP surface tests: drive the router in-process and check response
//! envelopes, status codes, and what ends up in the store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use catalyst_chat::{ChatMessage, GenerationOptions, NoopGenerator, TextGenerator};
use catalyst_core::tags::STANDARD_TAGS;
use catalyst_core::{CatalystConfig, Error, Result};
use catalyst_server::{build_router, AppState};
use catalyst_store::{NewPitch, PitchStatus, SqliteStore};

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Replies with a fixed completion for every prompt.
struct FixedReply(&'static str);

#[async_trait]
impl TextGenerator for FixedReply {
    async fn generate(&self, _: Vec<ChatMessage>, _: GenerationOptions) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Always fails, like an upstream outage.
struct Failing;

#[async_trait]
impl TextGenerator for Failing {
    async fn generate(&self, _: Vec<ChatMessage>, _: GenerationOptions) -> Result<String> {
        Err(Error::Http("503 Service Unavailable".into()))
    }

    fn is_available(&self) -> bool {
        true
    }
}

struct TestApp {
    _dir: TempDir,
    state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let dir = TempDir::new().unwrap();
        let config = CatalystConfig::from_env(dir.path()).unwrap();
        let store = SqliteStore::open(&config.data_paths.database).unwrap();
        let state = Arc::new(AppState::new(config, store, generator));
        let router = build_router(state.clone());
        Self {
            _dir: dir,
            state,
            router,
        }
    }

    fn offline() -> Self {
        Self::new(Arc::new(NoopGenerator))
    }

    fn store(&self) -> &SqliteStore {
        &self.state.store
    }

    fn seed(&self, title: &str, transcript: &str, tags: &[&str], created_at: i64) -> i64 {
        let new = NewPitch {
            quote: Some(format!("{} quote", title)),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: PitchStatus::Published,
            created_at: Some(created_at),
            ..NewPitch::new(title, transcript)
        };
        self.store().insert_pitch(&new).unwrap().id
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ---------------------------------------------------------------
// Submit
// ---------------------------------------------------------------

#[tokio::test]
async fn test_submit_requires_title_and_transcript() {
    let app = TestApp::offline();

    for body in [
        json!({"title": "", "transcript": "hello"}),
        json!({"title": "Idea", "transcript": "   "}),
        json!({"transcript": "hello"}),
        json!({}),
    ] {
        let (status, resp) = app.post("/api/submit-pitch", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["success"], false);
        assert_eq!(resp["error"], "Title and transcript are required");
    }
    assert_eq!(app.store().count_pitches().unwrap(), 0);
}

#[tokio::test]
async fn test_submit_minimal_pitch_is_published() {
    let app = TestApp::offline();

    let (status, resp) = app
        .post("/api/submit-pitch", json!({"title": "A", "transcript": "B"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);
    assert_eq!(resp["pitch"]["title"], "A");
    assert_eq!(resp["pitch"]["status"], "published");
    assert!(resp["pitch"]["uuid"].is_string());

    let id = resp["pitch"]["id"].as_i64().unwrap();
    let stored = app.store().get_pitch(id).unwrap().unwrap();
    assert_eq!(stored.status, PitchStatus::Published);
    // Offline generator: the quote is derived from the transcript.
    assert_eq!(stored.quote.as_deref(), Some("B"));
    assert!(stored.description.is_none());
    assert!(stored.tags.is_empty());
}

#[tokio::test]
async fn test_submit_trims_fields_and_dedupes_tags() {
    let app = TestApp::new(Arc::new(FixedReply("\"Bricks from the sea.\"")));

    let (status, resp) = app
        .post(
            "/api/submit-pitch",
            json!({
                "title": "  Ocean Bricks  ",
                "description": "   ",
                "transcript": " We turn beach plastic into bricks. ",
                "audioUrl": "https://cdn.example.com/a.webm",
                "tags": ["🌊 Ocean", " 🌊 Ocean ", "", "Recycling"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let id = resp["pitch"]["id"].as_i64().unwrap();
    let stored = app.store().get_pitch(id).unwrap().unwrap();
    assert_eq!(stored.title, "Ocean Bricks");
    assert_eq!(stored.transcript, "We turn beach plastic into bricks.");
    assert!(stored.description.is_none());
    assert_eq!(stored.audio_url.as_deref(), Some("https://cdn.example.com/a.webm"));
    assert_eq!(stored.tags, vec!["🌊 Ocean", "Recycling"]);
    assert_eq!(stored.quote.as_deref(), Some("Bricks from the sea."));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::offline();
    let (status, resp) = app
        .post_raw("/api/submit-pitch", "{not json".to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["success"], false);
    assert!(resp["error"].is_string());
}

#[tokio::test]
async fn test_wrong_method_is_405_envelope() {
    let app = TestApp::offline();

    let (status, resp) = app.get("/api/submit-pitch").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp, json!({"success": false, "error": "Method not allowed"}));

    let (status, resp) = app.post("/api/pitches", json!({})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp["error"], "Method not allowed");
}

// ---------------------------------------------------------------
// Feed
// ---------------------------------------------------------------

#[tokio::test]
async fn test_feed_lists_published_oldest_first() {
    let app = TestApp::offline();
    let now = now_ms();

    let newer = app.seed("Kelp Farm Co", "Farming kelp.", &["🌊 Ocean"], now);
    let older = app.seed(
        "Solar Roofs",
        "Cheap solar.",
        &["🌱 CleanTech"],
        now - 2 * HOUR_MS - 60_000,
    );
    let mut draft = NewPitch::new("Hidden", "Not yet.");
    draft.created_at = Some(now - 10 * HOUR_MS);
    app.store().insert_pitch(&draft).unwrap();

    let (status, resp) = app.get("/api/pitches").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);

    let pitches = resp["pitches"].as_array().unwrap();
    assert_eq!(pitches.len(), 2);
    assert_eq!(pitches[0]["id"], older);
    assert_eq!(pitches[1]["id"], newer);

    assert_eq!(pitches[0]["timestamp"], "2 hours ago");
    assert_eq!(pitches[1]["timestamp"], "Just now");
    assert_eq!(pitches[0]["creator"], "Solar Roofs");
    assert_eq!(pitches[0]["avatar"], "SR");
    assert_eq!(pitches[0]["quote"], "Solar Roofs quote");
    assert_eq!(pitches[0]["summary"], "Cheap solar....");
    assert!(pitches[0]["audioUrl"].is_null());
}

#[tokio::test]
async fn test_feed_tag_filter() {
    let app = TestApp::offline();
    let now = now_ms();
    app.seed("Kelp Farm", "Kelp.", &["🌊 Ocean"], now - 3 * HOUR_MS);
    app.seed("Solar Roofs", "Solar.", &["🌱 CleanTech"], now - 2 * HOUR_MS);
    app.seed("Pixel Quest", "A game.", &["🎮 Gaming", "🌊 Ocean"], now - HOUR_MS);

    let (_, resp) = app.get("/api/pitches?tags=%F0%9F%8C%8A%20Ocean").await;
    let titles: Vec<&str> = resp["pitches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Kelp Farm", "Pixel Quest"]);

    let (_, resp) = app.get("/api/pitches").await;
    assert_eq!(resp["pitches"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_feed_bad_query_uses_error_envelope() {
    let app = TestApp::offline();
    let req = Request::builder()
        .uri("/api/pitches?tags=a&tags=b")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"));

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"success": false, "error": "Invalid query parameters"}));
}

// ---------------------------------------------------------------
// Tags
// ---------------------------------------------------------------

#[tokio::test]
async fn test_tags_endpoint_merges_existing() {
    let app = TestApp::offline();
    let now = now_ms();
    app.seed("One", "x", &["zeta", "🌊 Ocean"], now);
    app.seed("Two", "y", &["alpha", "zeta"], now);

    let (status, resp) = app.get("/api/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);

    let tags = &resp["tags"];
    assert_eq!(tags["standard"].as_array().unwrap().len(), 9);
    assert_eq!(tags["existing"], json!(["zeta", "🌊 Ocean", "alpha"]));

    let all: Vec<&str> = tags["all"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert_eq!(all.len(), 11);
    assert!(all[..9].iter().all(|t| STANDARD_TAGS.contains(t)));
    assert_eq!(&all[9..], &["alpha", "zeta"]);
}

#[tokio::test]
async fn test_tags_endpoint_on_empty_store() {
    let app = TestApp::offline();
    let (_, resp) = app.get("/api/tags").await;
    assert_eq!(resp["tags"]["existing"], json!([]));
    assert_eq!(resp["tags"]["all"].as_array().unwrap().len(), 9);
}

// ---------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------

#[tokio::test]
async fn test_extract_quote() {
    let app = TestApp::new(Arc::new(FixedReply("'Plastic in, bricks out.'")));

    let (status, resp) = app
        .post("/api/extract-quote", json!({"transcript": "We make bricks."}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({"success": true, "quote": "Plastic in, bricks out."}));

    let (status, resp) = app.post("/api/extract-quote", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "Transcript is required");
}

#[tokio::test]
async fn test_extract_quote_falls_back_on_generator_failure() {
    let app = TestApp::new(Arc::new(Failing));
    let transcript = "We turn ocean plastic into building bricks. Schools get them cheap.";

    let (status, resp) = app
        .post("/api/extract-quote", json!({"transcript": transcript}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["quote"], "We turn ocean plastic into building bricks");
}

#[tokio::test]
async fn test_analyze_pitch_content() {
    let reply = r#"```json
{"title": "Ocean Bricks", "summary": "Bricks from beach plastic.", "tags": ["🌊 Ocean", "🌊 Ocean", 7, " Startup "]}
```"#;
    let app = TestApp::new(Arc::new(FixedReply(reply)));

    let (status, resp) = app
        .post(
            "/api/analyze-content",
            json!({"type": "pitch", "content": "We turn beach plastic into bricks."}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);
    assert_eq!(
        resp["suggestions"],
        json!({
            "title": "Ocean Bricks",
            "summary": "Bricks from beach plastic.",
            "tags": ["🌊 Ocean", "Startup"],
        })
    );
}

#[tokio::test]
async fn test_analyze_pitch_content_offline_uses_fallback() {
    let app = TestApp::offline();
    let (_, resp) = app
        .post(
            "/api/analyze-content",
            json!({"type": "pitch", "content": "Bricks from the beach. More later."}),
        )
        .await;
    assert_eq!(resp["suggestions"]["title"], "Bricks from the beach");
    assert_eq!(
        resp["suggestions"]["tags"],
        json!(["🤖 AI/ML", "💸 Needs Funding", "Innovation"])
    );
}

#[tokio::test]
async fn test_analyze_legacy_templates() {
    let app = TestApp::offline();
    let (status, resp) = app
        .post(
            "/api/analyze-content",
            json!({"transcript": "clean ocean tech, we need money"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["analysis"]["source"], "transcript");
    assert_eq!(resp["analysis"]["wordCount"], 6);
    assert_eq!(resp["templates"][0]["id"], "climate-venture");
    assert!(resp["templates"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn test_analyze_rejects_unknown_shape() {
    let app = TestApp::offline();
    for body in [json!({}), json!({"type": "image", "content": "x"}), json!({"type": "pitch"})] {
        let (status, resp) = app.post("/api/analyze-content", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            resp["error"],
            r#"Invalid request. Please provide content with type "pitch"."#
        );
    }
}

// ---------------------------------------------------------------
// Backfill
// ---------------------------------------------------------------

#[tokio::test]
async fn test_backfill_fills_missing_quotes_once() {
    let app = TestApp::new(Arc::new(FixedReply("A quote.")));
    let mut ids = Vec::new();
    for title in ["First", "Second"] {
        let new = NewPitch {
            status: PitchStatus::Published,
            ..NewPitch::new(title, "Some transcript.")
        };
        ids.push(app.store().insert_pitch(&new).unwrap().id);
    }
    app.seed("Quoted", "Already done.", &[], now_ms());

    let (status, resp) = app.post("/api/update-existing-quotes", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);
    assert_eq!(resp["updated"], 2);
    assert_eq!(resp["message"], "Updated 2 pitches with quotes");

    for id in ids {
        let stored = app.store().get_pitch(id).unwrap().unwrap();
        assert_eq!(stored.quote.as_deref(), Some("A quote."));
    }

    let (_, resp) = app.post("/api/update-existing-quotes", json!({})).await;
    assert_eq!(resp["updated"], 0);
    assert_eq!(resp["message"], "All pitches already have quotes");
}

// ---------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------

#[tokio::test]
async fn test_subscribe_and_duplicate() {
    let app = TestApp::offline();

    let (status, resp) = app
        .post("/api/subscribe", json!({"email": "  Founder@Example.com "}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);
    assert_eq!(resp["alreadySubscribed"], false);
    assert_eq!(resp["subscription"]["email"], "founder@example.com");
    assert_eq!(resp["subscription"]["source"], "website");

    let (status, resp) = app
        .post("/api/subscribe", json!({"email": "founder@example.com", "source": "footer"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({"success": true, "alreadySubscribed": true}));

    let stored = app
        .store()
        .get_subscription_by_email("founder@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "active");
}

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let app = TestApp::offline();
    for body in [json!({}), json!({"email": "not-an-email"})] {
        let (status, resp) = app.post("/api/subscribe", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["success"], false);
    }
}
