//! HTTP transport.
//!
//! Serves two protocols from one axum router:
//! - the verb protocol on `POST {dispatch_path}`, with the envelope's status
//!   class mapped onto the HTTP status;
//! - MCP JSON-RPC 2.0 on `POST {rpc_path}`, so plain HTTP clients can use the
//!   same methods as stdio and TCP sessions.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use bytes::Bytes;
use rmcp::{ErrorData as McpError, ServerHandler, model::JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::dispatch::{DispatchError, Request, Response};

pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, -32601, format!("Method not found: {method}"))
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Carry an MCP error through unchanged.
    pub fn from_mcp(id: Option<Value>, err: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: err.code.0,
                message: err.message.to_string(),
                data: err.data,
            }),
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    config: Arc<HttpConfig>,
    session: Arc<RwLock<Option<SessionState>>>,
}

/// What the last `initialize` call told us about the client.
#[derive(Debug, Clone)]
struct SessionState {
    client: String,
    protocol_version: String,
    initialized: bool,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (CORS {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" }
        );
        info!("  → Dispatch: POST {}", self.config.dispatch_path);
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

/// Build the router for a server.
pub fn router(server: McpServer, config: &HttpConfig) -> Router {
    let state = AppState {
        server,
        config: Arc::new(config.clone()),
        session: Arc::new(RwLock::new(None)),
    };

    let app = Router::new()
        .route(&config.dispatch_path, post(handle_dispatch))
        .route(&config.rpc_path, post(handle_rpc))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state);

    if config.enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Server info and endpoint map.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.server.dispatcher().registry();
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "dispatch": state.config.dispatch_path,
            "rpc": state.config.rpc_path,
            "health": "/health"
        },
        "capabilities": registry.len()
    }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "session": session.as_ref().map(|s| json!({
            "client": s.client,
            "protocolVersion": s.protocol_version,
            "initialized": s.initialized
        }))
    }))
}

/// Verb protocol endpoint.
///
/// Undecodable bodies get a `bad_request` envelope like any other malformed
/// request.
#[instrument(skip_all)]
async fn handle_dispatch(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = match serde_json::from_slice::<Request>(&body) {
        Ok(request) => state.server.dispatcher().dispatch(request).await,
        Err(e) => {
            warn!("Undecodable dispatch body: {}", e);
            Response::from(DispatchError::malformed(e.to_string()))
        }
    };

    let status = StatusCode::from_u16(response.http_status()).unwrap_or(StatusCode::OK);
    (status, Json(response))
}

/// MCP JSON-RPC endpoint.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request = match serde_json::from_slice::<JsonRpcRequest>(&body) {
        Ok(request) => request,
        Err(e) => return Json(JsonRpcResponse::parse_error(e.to_string())),
    };

    tracing::Span::current().record("method", request.method.as_str());
    debug!("Received JSON-RPC request: {}", request.method);

    Json(process_request(&state, request).await)
}

async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    let server = &state.server;
    let id = request.id.clone();
    let params = request.params.clone().unwrap_or_else(|| json!({}));

    match request.method.as_str() {
        "initialize" => {
            initialize(state, &params).await;
            reply(id, Ok(server.get_info()))
        }
        "tools/list" => reply(id, Ok(json!({ "tools": server.tools() }))),
        "tools/call" => match name_param(&params) {
            Some(name) => reply(id, server.run_tool(name, object_param(&params)).await),
            None => JsonRpcResponse::invalid_params(id, "Missing tool name"),
        },
        "resources/list" => reply(id, Ok(json!({ "resources": server.resources() }))),
        "resources/templates/list" => reply(
            id,
            Ok(json!({ "resourceTemplates": server.resource_templates() })),
        ),
        "resources/read" => match params.get("uri").and_then(Value::as_str) {
            Some(uri) => reply(id, server.fetch_resource(uri).await),
            None => JsonRpcResponse::invalid_params(id, "Missing resource URI"),
        },
        "prompts/list" => reply(id, Ok(json!({ "prompts": server.prompts() }))),
        "prompts/get" => match name_param(&params) {
            Some(name) => reply(id, server.render_prompt(name, object_param(&params)).await),
            None => JsonRpcResponse::invalid_params(id, "Missing prompt name"),
        },
        method if method.starts_with("notifications/") => {
            handle_notification(state, method).await;
            JsonRpcResponse::success(id, Value::Null)
        }
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(id, method)
        }
    }
}

fn reply<T: Serialize>(id: Option<Value>, result: Result<T, McpError>) -> JsonRpcResponse {
    match result.map(serde_json::to_value) {
        Ok(Ok(value)) => JsonRpcResponse::success(id, value),
        Ok(Err(e)) => JsonRpcResponse::internal_error(id, e.to_string()),
        Err(err) => JsonRpcResponse::from_mcp(id, err),
    }
}

fn name_param(params: &Value) -> Option<&str> {
    params.get("name").and_then(Value::as_str)
}

fn object_param(params: &Value) -> Option<JsonObject> {
    params.get("arguments").and_then(Value::as_object).cloned()
}

async fn initialize(state: &AppState, params: &Value) {
    let client = params
        .pointer("/clientInfo/name")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or("2024-11-05")
        .to_string();
    info!("Initialize from {} (protocol {})", client, protocol_version);

    *state.session.write().await = Some(SessionState {
        client,
        protocol_version,
        initialized: false,
    });
}

async fn handle_notification(state: &AppState, method: &str) {
    if method == "notifications/initialized" {
        if let Some(session) = state.session.write().await.as_mut() {
            session.initialized = true;
        }
        info!("Client initialized");
    } else {
        debug!("Ignoring notification: {}", method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::{resources::corporate_resources, tools::corporate_tools};
    use axum::body::Body;
    use http::Request as HttpRequest;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let groups = vec![corporate_resources().unwrap(), corporate_tools().unwrap()];
        let server = McpServer::with_groups(Config::default(), groups).unwrap();
        router(server, &HttpConfig::default())
    }

    async fn post(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                HttpRequest::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let (status, body) = post(
            app(),
            "/dispatch",
            json!({ "verb": "execute", "name": "list_meeting_rooms" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"][2], "Board Room");
    }

    #[tokio::test]
    async fn test_dispatch_status_mapping() {
        let (status, body) = post(
            app(),
            "/dispatch",
            json!({ "verb": "execute", "name": "book_room" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["status_class"], "not_found");

        let (status, body) = post(
            app(),
            "/dispatch",
            json!({ "verb": "execute", "name": "send_email", "arguments": { "subject": "Hi" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status_class"], "bad_request");

        let (status, body) = post(
            app(),
            "/dispatch",
            json!({
                "verb": "execute",
                "name": "send_email",
                "arguments": { "recipient": "bad", "subject": "Hi", "body": "..." }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["status_class"], "handler_error");
    }

    #[tokio::test]
    async fn test_dispatch_undecodable_body() {
        let response = app()
            .oneshot(
                HttpRequest::post("/dispatch")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rpc_tools_list_and_call() {
        let (_, body) = post(
            app(),
            "/mcp",
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
        )
        .await;
        let names: Vec<_> = body["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["list_meeting_rooms", "send_email"]);

        let (_, body) = post(
            app(),
            "/mcp",
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {
                    "name": "send_email",
                    "arguments": { "recipient": "bad", "subject": "Hi", "body": "..." }
                }
            }),
        )
        .await;
        assert_eq!(body["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_rpc_read_unknown_resource() {
        let (_, body) = post(
            app(),
            "/mcp",
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "resources/read",
                "params": { "uri": "corporate://payroll" }
            }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32002);
    }

    #[tokio::test]
    async fn test_rpc_unknown_method() {
        let (_, body) = post(
            app(),
            "/mcp",
            json!({ "jsonrpc": "2.0", "id": 4, "method": "sampling/createMessage" }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(HttpRequest::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
