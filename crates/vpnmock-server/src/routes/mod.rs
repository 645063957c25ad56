//! HTTP routes
//!
//! One module per resource. All handlers share a single store behind one
//! `RwLock`; each takes its guard once and holds it for the whole
//! read-modify-write.

pub mod connection;
pub mod history;
pub mod profiles;
pub mod rules;
pub mod servers;
pub mod status;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vpnmock_core::VpnStore;

use crate::response::ApiError;

/// Store shared across handlers
pub type SharedStore = Arc<RwLock<VpnStore>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

/// Build the complete axum router around `store`
pub fn build_router(store: VpnStore) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
    };

    Router::new()
        .route(
            "/api/servers",
            get(servers::list_servers).post(servers::create_server),
        )
        .route(
            "/api/servers/{id}",
            get(servers::get_server)
                .put(servers::update_server)
                .delete(servers::delete_server),
        )
        .route("/api/rules", get(rules::list_rules).post(rules::create_rule))
        .route("/api/rules/{id}", delete(rules::delete_rule))
        .route("/api/rules/{id}/toggle", patch(rules::toggle_rule))
        .route("/api/profiles", get(profiles::list_profiles))
        .route("/api/profiles/active", get(profiles::active_profile))
        .route("/api/connection", get(connection::get_connection))
        .route("/api/connection/connect", post(connection::connect))
        .route("/api/connection/disconnect", post(connection::disconnect))
        .route(
            "/api/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/api/status", get(status::get_status))
        .route("/api/health", get(status::get_health))
        .fallback(route_not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(VpnStore::default())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request build failed");

        let resp = app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body collect failed")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is not JSON")
        };
        (status, json)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn connect(app: &Router, server_id: &str) -> (StatusCode, Value) {
        send(
            app,
            Method::POST,
            "/api/connection/connect",
            Some(json!({ "serverId": server_id })),
        )
        .await
    }

    async fn disconnect(app: &Router) -> (StatusCode, Value) {
        send(app, Method::POST, "/api/connection/disconnect", None).await
    }

    #[tokio::test]
    async fn test_connect_then_history() {
        let app = app();

        let (status, body) = connect(&app, "1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["connected"], true);
        assert_eq!(data["serverId"], "1");
        assert_eq!(data["serverName"], "US Server 1");
        assert_eq!(data["stats"], json!({ "bytesIn": 0, "bytesOut": 0 }));
        assert!(data["connectedAt"].is_string());

        let (status, body) = get_json(&app, "/api/history?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["type"], "connect");
        assert_eq!(entries[0]["server"], "US Server 1");
    }

    #[tokio::test]
    async fn test_connect_unknown_server() {
        let app = app();

        let (status, body) = connect(&app, "missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Server not found" }));

        let (_, body) = get_json(&app, "/api/connection").await;
        assert_eq!(body["data"]["connected"], false);
        assert_eq!(body["data"]["serverId"], Value::Null);

        let (_, body) = get_json(&app, "/api/history").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_without_server_id() {
        let app = app();

        let (status, _) =
            send(&app, Method::POST, "/api/connection/connect", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Numeric ids never match string server ids
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/connection/connect",
            Some(json!({ "serverId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_disconnect_logs_before_connect() {
        let app = app();
        connect(&app, "2").await;

        let (status, body) = disconnect(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["connected"], false);
        assert_eq!(body["data"]["serverName"], Value::Null);
        assert_eq!(body["data"]["connectedAt"], Value::Null);

        let (_, body) = get_json(&app, "/api/history").await;
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["type"], "disconnect");
        assert_eq!(entries[0]["server"], "UK Server 1");
        assert_eq!(entries[1]["type"], "connect");
    }

    #[tokio::test]
    async fn test_disconnect_when_idle() {
        let app = app();

        let (status, body) = disconnect(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["connected"], false);

        let (_, body) = get_json(&app, "/api/history").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_limit_after_five_cycles() {
        let app = app();
        for id in ["1", "2", "3", "4", "2"] {
            connect(&app, id).await;
            disconnect(&app).await;
        }

        let (_, body) = get_json(&app, "/api/history").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);

        let (_, body) = get_json(&app, "/api/history?limit=2").await;
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["type"], "disconnect");
        assert_eq!(entries[1]["type"], "connect");
        assert_eq!(entries[1]["server"], "UK Server 1");

        let (_, body) = get_json(&app, "/api/history?limit=junk").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);

        let (_, body) = get_json(&app, "/api/history?limit=5abc").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let app = app();
        connect(&app, "1").await;

        let (status, body) = send(&app, Method::DELETE, "/api/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (_, body) = get_json(&app, "/api/history").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_server() {
        let app = app();
        let submitted = json!({
            "name": "Canada Server 1",
            "host": "ca1.vpn.example.com",
            "port": 1194,
            "protocol": "OpenVPN",
            "country": "CA",
            "note": "added in test",
        });

        let (status, body) =
            send(&app, Method::POST, "/api/servers", Some(submitted.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = get_json(&app, &format!("/api/servers/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let server = &body["data"];
        for (key, value) in submitted.as_object().unwrap() {
            assert_eq!(&server[key], value, "field {key}");
        }
        assert_eq!(server["status"], "online");

        let (_, body) = get_json(&app, "/api/servers").await;
        let servers = body["data"].as_array().unwrap();
        assert_eq!(servers.last().unwrap()["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_get_missing_server() {
        let (status, body) = get_json(&app(), "/api/servers/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Server not found");
    }

    #[tokio::test]
    async fn test_update_server_preserves_other_fields() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/servers/1",
            Some(json!({ "name": "US East", "status": "offline" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "US East");
        assert_eq!(body["data"]["status"], "offline");
        assert_eq!(body["data"]["host"], "us1.vpn.example.com");
        assert_eq!(body["data"]["port"], 1194);

        let (status, _) = send(&app, Method::PUT, "/api/servers/404", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_server_is_idempotent() {
        let app = app();
        let (_, before) = get_json(&app, "/api/servers").await;

        let (status, body) = send(&app, Method::DELETE, "/api/servers/unknown", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (_, after) = get_json(&app, "/api/servers").await;
        assert_eq!(before, after);

        let (status, _) = send(&app, Method::DELETE, "/api/servers/3", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(&app, "/api/servers/3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rule_create_toggle_delete() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/rules",
            Some(json!({
                "name": "Games",
                "pattern": "*.steam.com",
                "serverId": "4",
                "priority": 3,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["enabled"], true);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/rules/{id}/toggle");
        let (_, body) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(body["data"]["enabled"], false);
        let (_, body) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(body["data"]["enabled"], true);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/rules/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profiles() {
        let app = app();

        let (_, list) = get_json(&app, "/api/profiles").await;
        let (status, active) = get_json(&app, "/api/profiles/active").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(active["data"], list["data"][0]);
        assert_eq!(active["data"]["killSwitch"], true);
    }

    #[tokio::test]
    async fn test_status_snapshot() {
        let app = app();
        connect(&app, "1").await;

        let (status, body) = get_json(&app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["connection"]["connected"], true);
        assert_eq!(data["servers"].as_array().unwrap().len(), 4);
        assert_eq!(data["stats"]["totalServers"], 4);
        assert_eq!(data["stats"]["enabledRules"], 1);
        assert_eq!(data["stats"]["historyCount"], 1);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(&app(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
        assert!(body.get("success").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/servers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::POST, "/api/servers", Some(json!(["a"]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    async fn send_raw(
        app: &Router,
        uri: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).expect("request build failed");

        let resp = app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body collect failed")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("response is not JSON"))
    }

    #[tokio::test]
    async fn test_bodies_without_content_type() {
        let app = app();

        let (status, body) = send_raw(&app, "/api/servers", None, r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "x");
        assert_eq!(body["data"]["status"], "online");

        let (status, body) =
            send_raw(&app, "/api/connection/connect", None, r#"{"serverId":"1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["serverName"], "US Server 1");

        let (status, _) =
            send_raw(&app, "/api/servers", Some("text/plain"), r#"{"port":1194}"#).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_empty_bodies() {
        let app = app();

        let (status, body) = send_raw(&app, "/api/rules", Some("application/json"), "").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["enabled"], true);

        let (status, body) = send_raw(&app, "/api/servers", None, "").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "online");

        let (status, body) = send_raw(&app, "/api/connection/connect", None, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Server not found");
    }

    #[tokio::test]
    async fn test_connect_only_fails_with_not_found() {
        let app = app();

        for body in ["{ not json", "[1, 2]", "\"1\""] {
            let (status, reply) =
                send_raw(&app, "/api/connection/connect", Some("application/json"), body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "body {body}");
            assert_eq!(reply["success"], false);
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_json(&app(), "/api/tunnels").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Route not found" }));
    }
}
