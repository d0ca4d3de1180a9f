use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use hotjar_domain::constants::WEBHOOK_PATH;
use hotjar_domain::{HotjarError, Result, WebhookDelivery};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::WebhookFilter;

#[derive(Clone)]
struct WebhookState {
    filter: Arc<WebhookFilter>,
    sender: mpsc::Sender<WebhookDelivery>,
}

/// Router exposing `POST /webhook`.
///
/// Accepted deliveries are forwarded on `sender`. Every JSON call is answered
/// with 200, including ignored events; bodies that are not JSON get 400.
pub fn webhook_router(filter: WebhookFilter, sender: mpsc::Sender<WebhookDelivery>) -> Router {
    let state = WebhookState { filter: Arc::new(filter), sender };
    Router::new().route(WEBHOOK_PATH, post(handle_webhook)).with_state(state)
}

async fn handle_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "rejecting webhook with non-JSON body");
                return StatusCode::BAD_REQUEST;
            }
        }
    };

    let Some(delivery) = state.filter.accept(header_map(&headers), body) else {
        return StatusCode::OK;
    };

    debug!(event = %delivery.event, "webhook accepted");
    if state.sender.send(delivery).await.is_err() {
        warn!("webhook receiver dropped, delivery discarded");
    }

    StatusCode::OK
}

/// Flatten headers; repeated names are joined with `", "`.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

/// Webhook endpoint served on its own listener.
pub struct WebhookServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl WebhookServer {
    /// Bind `addr` (port 0 picks a free port) and start serving.
    ///
    /// # Errors
    /// `HotjarError::Config` if the address cannot be bound.
    pub async fn start(
        addr: SocketAddr,
        filter: WebhookFilter,
        sender: mpsc::Sender<WebhookDelivery>,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await.map_err(|err| {
            HotjarError::Config(format!("failed to bind webhook listener on {addr}: {err}"))
        })?;
        let addr = listener
            .local_addr()
            .map_err(|err| HotjarError::Config(format!("failed to determine webhook address: {err}")))?;

        let expected = filter.expected();
        let app = webhook_router(filter, sender);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                error!("webhook server error: {}", err);
            }
        });

        info!(%addr, event = %expected, "webhook server listening");

        Ok(Self { addr, shutdown_tx: Some(shutdown_tx), handle: Some(handle) })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL to register in the Hotjar dashboard (for a locally reachable host).
    pub fn webhook_url(&self) -> String {
        format!("http://{}{}", self.addr, WEBHOOK_PATH)
    }

    /// Stop accepting connections and wait for the server task.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for WebhookServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
