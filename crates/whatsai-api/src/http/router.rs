//! Axum router configuration with middleware.
//!
//! Dashboard routes live under `/api/v1/`; the bridge webhook sits beside
//! them at `/api/v1/whatsapp/events`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Status
        .route("/status", get(handlers::status::get_status))
        .route("/status/toggle", post(handlers::status::toggle_status))
        .route("/status/active", put(handlers::status::set_active))
        // Personality
        .route(
            "/personalities",
            get(handlers::personality::list_personalities),
        )
        .route(
            "/personality",
            get(handlers::personality::get_personality)
                .put(handlers::personality::set_personality),
        )
        // Style training
        .route(
            "/training",
            get(handlers::training::get_training).post(handlers::training::start_training),
        )
        // Activity log
        .route("/activity", get(handlers::activity::get_activity))
        // Conversation context
        .route(
            "/contacts/{id}/history",
            get(handlers::contacts::get_history),
        )
        // Test chat
        .route("/preview", post(handlers::preview::preview_reply))
        // Bridge webhook
        .route("/whatsapp/events", post(handlers::webhook::receive_event));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::http::test_support::{body_json, state_with, test_state};
    use whatsai_types::config::GlobalConfig;

    const ANALYSIS: &str =
        r#"{"tone":"playful","frequentlyUsedPhrases":["lol"],"systemInstruction":"use lol often"}"#;

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let mut config = GlobalConfig::default();
        config.dashboard.api_token = Some("dash".to_string());
        let app = build_router(state_with(config, "ok"));

        let resp = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_reports_snapshot() {
        let app = build_router(test_state("ok"));
        let resp = app.oneshot(get_req("/api/v1/status")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["data"]["is_active"], true);
        assert_eq!(body["data"]["connected"], false);
        assert_eq!(body["data"]["replies_sent"], 0);
        assert_eq!(body["data"]["provider"], "stub");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_toggle_flips_and_logs() {
        let state = test_state("ok");
        let app = build_router(state.clone());

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/status/toggle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["is_active"], false);
        assert!(!state.ctx.status.is_active());
        assert_eq!(state.ctx.activity.entries()[0].message, "Bot DISABLED by user");
    }

    #[tokio::test]
    async fn test_set_active_explicit() {
        let state = test_state("ok");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "PUT",
                "/api/v1/status/active",
                serde_json::json!({"active": false}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!state.ctx.status.is_active());
    }

    #[tokio::test]
    async fn test_dashboard_token_enforced() {
        let mut config = GlobalConfig::default();
        config.dashboard.api_token = Some("dash".to_string());
        let app = build_router(state_with(config, "ok"));

        let resp = app
            .clone()
            .oneshot(get_req("/api/v1/status"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["errors"][0]["code"], "UNAUTHORIZED");

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status")
                    .header("authorization", "Bearer dash")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status")
                    .header("x-api-key", "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_personalities_lists_presets_and_active() {
        let app = build_router(test_state("ok"));
        let resp = app.oneshot(get_req("/api/v1/personalities")).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["presets"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["active"]["type"], "Casual");
    }

    #[tokio::test]
    async fn test_switch_to_preset() {
        let state = test_state("ok");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "PUT",
                "/api/v1/personality",
                serde_json::json!({"type": "Witty"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["type"], "Witty");
        assert_eq!(body["data"]["description"], "Sharp, funny, uses clever wordplay.");
        assert_eq!(
            state.ctx.activity.entries()[0].message,
            "Personality changed to: Witty"
        );
    }

    #[tokio::test]
    async fn test_switch_to_full_personality() {
        let state = test_state("ok");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "PUT",
                "/api/v1/personality",
                serde_json::json!({
                    "type": "Custom",
                    "description": "dry",
                    "custom_instructions": "never use emojis"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let active = state.ctx.personalities.active().await;
        assert_eq!(active.description, "dry");
        assert_eq!(active.custom_instructions.as_deref(), Some("never use emojis"));
    }

    #[tokio::test]
    async fn test_custom_type_alone_is_rejected() {
        let app = build_router(test_state("ok"));
        let resp = app
            .oneshot(json_req(
                "PUT",
                "/api/v1/personality",
                serde_json::json!({"type": "Custom"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_training_short_sample_rejected() {
        let state = test_state(ANALYSIS);
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/training",
                serde_json::json!({"sample": "too short"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            state.ctx.personalities.active().await.personality_type.to_string(),
            "Casual"
        );
    }

    #[tokio::test]
    async fn test_training_applies_custom_personality() {
        let state = test_state(ANALYSIS);
        let app = build_router(state.clone());
        let sample = "lol ok see u there. lol that's so funny, i can't even. bring snacks lol";
        let resp = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/v1/training",
                serde_json::json!({"sample": sample}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["type"], "Custom");
        assert_eq!(body["data"]["custom_instructions"], "use lol often");

        let resp = app.oneshot(get_req("/api/v1/training")).await.unwrap();
        assert_eq!(body_json(resp).await["data"]["state"], "succeeded");
    }

    #[tokio::test]
    async fn test_activity_newest_first() {
        let state = test_state("ok");
        state.ctx.activity.info("first");
        state.ctx.activity.info("second");
        let app = build_router(state);

        let resp = app.oneshot(get_req("/api/v1/activity")).await.unwrap();
        let body = body_json(resp).await;
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries[0]["message"], "second");
        assert_eq!(entries[0]["level"], "info");
        assert!(entries[0]["line"].as_str().unwrap().ends_with("] second"));
    }

    #[tokio::test]
    async fn test_unknown_contact_has_empty_history() {
        let app = build_router(test_state("ok"));
        let resp = app
            .oneshot(get_req("/api/v1/contacts/15550000000@c.us/history"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_preview_generates_without_sending() {
        let state = test_state("  sounds good!  ");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/preview",
                serde_json::json!({"history": [{"text": "dinner at 7?", "sender": "them"}]}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["reply"], "sounds good!");
        assert_eq!(body["data"]["personality"], "Casual");
        assert_eq!(state.ctx.status.replies_sent(), 0);
        assert_eq!(state.ctx.conversations.contact_count(), 0);
    }

    #[tokio::test]
    async fn test_preview_requires_history() {
        let app = build_router(test_state("ok"));
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/preview",
                serde_json::json!({"history": []}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bridge_ready_marks_connected() {
        let state = test_state("ok");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/whatsapp/events",
                serde_json::json!({"type": "ready"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert!(state.ctx.status.is_connected());
        assert_eq!(
            state.ctx.activity.entries()[0].message,
            "Connected to WhatsApp Gateway"
        );
    }

    #[tokio::test]
    async fn test_bridge_disconnect_clears_connected() {
        let state = test_state("ok");
        state.ctx.set_connected(true);
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/whatsapp/events",
                serde_json::json!({"type": "disconnected", "reason": "LOGOUT"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert!(!state.ctx.status.is_connected());
    }

    #[tokio::test]
    async fn test_bridge_token_enforced() {
        let mut config = GlobalConfig::default();
        config.bridge.token = Some("bridge-secret".to_string());
        let state = state_with(config, "ok");
        let app = build_router(state.clone());

        let resp = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/v1/whatsapp/events",
                serde_json::json!({"type": "ready"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(!state.ctx.status.is_connected());

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/whatsapp/events")
                    .header("content-type", "application/json")
                    .header("x-bridge-token", "bridge-secret")
                    .body(Body::from(r#"{"type":"ready"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert!(state.ctx.status.is_connected());
    }

    #[tokio::test]
    async fn test_bridge_self_message_is_accepted_but_ignored() {
        let state = test_state("ok");
        let app = build_router(state.clone());
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/whatsapp/events",
                serde_json::json!({
                    "type": "message",
                    "from": "15551234567@c.us",
                    "body": "note to self",
                    "fromMe": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        // Let the spawned task run
        tokio::task::yield_now().await;
        assert_eq!(state.ctx.conversations.contact_count(), 0);
    }

    #[tokio::test]
    async fn test_bridge_rejects_malformed_event() {
        let app = build_router(test_state("ok"));
        let resp = app
            .oneshot(json_req(
                "POST",
                "/api/v1/whatsapp/events",
                serde_json::json!({"type": "unknown"}),
            ))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }
}
