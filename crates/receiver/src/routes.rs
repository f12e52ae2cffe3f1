//! Rotas HTTP do receiver.
//!
//! - `GET /` – health check, responde `OK`
//! - `POST /mcp/data` – aceita qualquer JSON bem-formado, registra no log e
//!   responde `{"status":"received"}`
//!
//! Sem validação de schema, sem persistência e sem deduplicação de
//! `message_id`.

use axum::Router;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use machining_core::protocol::{DATA_PATH, decode_envelope};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Monta o router do receiver.
pub fn router() -> Router {
    Router::new()
        .route("/", get(health))
        .route(DATA_PATH, post(receive_data))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

async fn receive_data(body: Bytes) -> (StatusCode, Json<Value>) {
    let msg: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!("Corpo inválido ({} bytes): {e}", body.len());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": e.to_string()})),
            );
        }
    };

    match decode_envelope(&body) {
        Ok(envelope) => info!(
            "[MCP recebido] {} | ferramenta {} | {}",
            envelope.message_id(),
            envelope.context.tool_id,
            msg
        ),
        Err(e) => {
            debug!("Corpo não é um envelope MCP: {e}");
            info!("[MCP recebido] {msg}");
        }
    }

    (StatusCode::OK, Json(json!({"status": "received"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use machining_core::{CuttingData, encode_envelope, pack_message};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Bytes) {
        let resp = router().oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/mcp/data")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn any_json_is_received() {
        let (status, body) = send(post_json(r#"{"a":1}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"status": "received"}));
    }

    fn encoded_envelope() -> Vec<u8> {
        let envelope = pack_message(&CuttingData {
            timestamp: "2024-01-01T00:00:00".into(),
            tool_id: "T01".into(),
            spindle_speed: 1500.0,
            feed_rate: 0.1,
            cutting_force: 300.0,
            temperature: 50.0,
            vibration: 0.02,
            wear_level: 0.05,
        });
        encode_envelope(&envelope).unwrap()
    }

    #[tokio::test]
    async fn envelope_is_received() {
        let (status, body) = send(post_json(encoded_envelope())).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "received");
    }

    #[tokio::test]
    async fn duplicate_message_ids_are_accepted() {
        let body = encoded_envelope();
        for _ in 0..2 {
            let (status, _) = send(post_json(body.clone())).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = send(post_json("{não é json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value["message"].is_string());
    }

    #[tokio::test]
    async fn empty_body_is_bad_request() {
        let (status, _) = send(post_json(Body::empty())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_on_data_path_is_not_allowed() {
        let request = Request::builder()
            .uri("/mcp/data")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
