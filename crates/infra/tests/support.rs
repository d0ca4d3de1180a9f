use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use hotjar_domain::{ApiConfig, Credentials};
use hotjar_infra::{HotjarClient, TokenCache};
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a token endpoint for `client_id` that answers with `token`.
///
/// `expected_calls` is verified when the server is dropped.
pub async fn mount_token(server: &MockServer, client_id: &str, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .and(body_string_contains(format!("client_id={client_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "expires_in": 3600,
            "token_type": "Bearer",
        })))
        .expect(expected_calls)
        .named(format!("token endpoint for {client_id}"))
        .mount(server)
        .await;
}

/// Client for `client_id` talking to the mock server, sharing `cache`.
pub fn client_for(server: &MockServer, client_id: &str, cache: &TokenCache) -> HotjarClient {
    HotjarClient::builder()
        .credentials(Credentials::new(client_id, "secret"))
        .config(ApiConfig { base_url: server.uri(), timeout_secs: 5, ..Default::default() })
        .token_cache(cache.clone())
        .build()
        .expect("client should build")
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
