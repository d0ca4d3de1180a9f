//! Conversions from external infrastructure errors into domain errors.

use hotjar_domain::HotjarError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HotjarError);

impl From<InfraError> for HotjarError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HotjarError> for InfraError {
    fn from(value: HotjarError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHotjarError {
    fn into_hotjar(self) -> HotjarError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HotjarError */
/* -------------------------------------------------------------------------- */

impl IntoHotjarError for HttpError {
    fn into_hotjar(self) -> HotjarError {
        if self.is_timeout() {
            return HotjarError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return HotjarError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return HotjarError::InvalidResponse(format!("failed to decode response body: {self}"));
        }

        if self.is_builder() {
            return HotjarError::Config(format!("invalid HTTP request: {self}"));
        }

        HotjarError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_hotjar())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HotjarError */
/* -------------------------------------------------------------------------- */

impl IntoHotjarError for JsonError {
    fn into_hotjar(self) -> HotjarError {
        HotjarError::InvalidResponse(format!("invalid JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_hotjar())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn connection_refused_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: HotjarError = InfraError::from(error).into();
        match mapped {
            HotjarError::Network(msg) => assert!(msg.contains("connection")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client
            .get(server.uri())
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap_err();

        let mapped: HotjarError = InfraError::from(error).into();
        assert!(matches!(mapped, HotjarError::InvalidResponse(_)));
    }

    #[test]
    fn json_error_maps_to_invalid_response() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: HotjarError = InfraError::from(error).into();
        match mapped {
            HotjarError::InvalidResponse(msg) => assert!(msg.starts_with("invalid JSON")),
            other => panic!("expected invalid response, got {other:?}"),
        }
    }
}
