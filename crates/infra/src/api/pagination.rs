//! Cursor pagination over list endpoints
//!
//! Pages are fetched strictly one after another with `limit=100`; the
//! server's `next_cursor` is passed back as `cursor` until it disappears or
//! the caller's item limit is met.

use hotjar_domain::constants::PAGE_SIZE;
use hotjar_domain::{HotjarError, PaginatedResponse, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::client::HotjarClient;

impl HotjarClient {
    /// Collect every item of a paginated endpoint, in server order.
    ///
    /// With `limit`, stops after the page that reaches it and returns exactly
    /// `limit` items. `Some(0)` means no limit.
    ///
    /// # Errors
    /// Any error from [`HotjarClient::request`], `InvalidResponse` for a page
    /// that is not a results envelope, and `PaginationCapExceeded` when
    /// `max_pages` is configured and the cursor is still present after that
    /// many pages.
    #[instrument(skip(self, query), fields(method = %method, path = %path))]
    pub async fn request_all_items(
        &self,
        method: Method,
        path: &str,
        query: Option<&Map<String, Value>>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let limit = limit.filter(|limit| *limit > 0);
        let max_pages = self.config().max_pages;

        let mut items: Vec<Value> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if let Some(max_pages) = max_pages {
                if pages >= max_pages {
                    return Err(HotjarError::PaginationCapExceeded { max_pages });
                }
            }

            let page_query = page_query(query, cursor.as_deref());
            let response = self.request(method.clone(), path, None, Some(&page_query)).await?;
            pages += 1;

            let page = decode_page(response)?;
            let last_page = page.is_last_page();
            let next = page.next_cursor().map(str::to_owned);
            items.extend(page.results);

            debug!(page = pages, collected = items.len(), has_more = !last_page, "fetched page");

            if let Some(limit) = limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    return Ok(items);
                }
            }

            if last_page {
                return Ok(items);
            }
            cursor = next;
        }
    }

    /// [`Self::request_all_items`] with each item decoded into `T`.
    pub async fn request_all_items_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Map<String, Value>>,
        limit: Option<usize>,
    ) -> Result<Vec<T>> {
        self.request_all_items(method, path, query, limit)
            .await?
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|err| HotjarError::InvalidResponse(format!("unexpected item shape: {err}")))
            })
            .collect()
    }
}

fn page_query(base: Option<&Map<String, Value>>, cursor: Option<&str>) -> Map<String, Value> {
    let mut query = base.cloned().unwrap_or_default();
    query.insert("limit".to_string(), Value::from(PAGE_SIZE));
    if let Some(cursor) = cursor {
        query.insert("cursor".to_string(), Value::String(cursor.to_string()));
    }
    query
}

fn decode_page(response: Value) -> Result<PaginatedResponse<Value>> {
    if response.is_null() {
        return Ok(PaginatedResponse { results: Vec::new(), next_cursor: None, total_count: None });
    }
    serde_json::from_value(response)
        .map_err(|err| HotjarError::InvalidResponse(format!("unexpected page shape: {err}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use hotjar_domain::{ApiConfig, Credentials};
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::AccessTokenProvider;

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self, _credentials: &Credentials) -> Result<String> {
            Ok("t".to_string())
        }

        fn invalidate_all(&self) {}
    }

    fn client(server: &MockServer, max_pages: Option<usize>) -> HotjarClient {
        HotjarClient::builder()
            .credentials(Credentials::new("client", "secret"))
            .config(ApiConfig { base_url: server.uri(), max_pages, ..Default::default() })
            .auth(Arc::new(StaticToken))
            .build()
            .unwrap()
    }

    fn items(range: std::ops::Range<u32>) -> Vec<Value> {
        range.map(|id| json!({"id": id})).collect()
    }

    async fn mount_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/responses"))
            .and(query_param("limit", "100"))
            .and(query_param_is_missing("cursor"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": items(0..100), "next_cursor": "c1"})),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/responses"))
            .and(query_param("cursor", "c1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": items(100..200), "next_cursor": "c2"})),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/responses"))
            .and(query_param("cursor", "c2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": items(200..240), "next_cursor": null})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn follows_cursor_to_the_end() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, None)
            .await
            .unwrap();

        assert_eq!(all.len(), 240);
        assert_eq!(all[0]["id"], 0);
        assert_eq!(all[239]["id"], 239);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn limit_stops_early_and_truncates() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let first = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, Some(150))
            .await
            .unwrap();

        assert_eq!(first.len(), 150);
        assert_eq!(first[149]["id"], 149);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn zero_limit_means_everything() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, Some(0))
            .await
            .unwrap();
        assert_eq!(all.len(), 240);
    }

    #[tokio::test]
    async fn limit_above_total_stops_at_last_page() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, Some(500))
            .await
            .unwrap();

        assert_eq!(all.len(), 240);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn limit_on_page_boundary_makes_one_request() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let first = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, Some(100))
            .await
            .unwrap();

        assert_eq!(first.len(), 100);
        assert_eq!(first[99]["id"], 99);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn null_results_are_an_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": null, "next_cursor": null})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, None)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn caller_query_is_kept_and_page_size_forced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/responses"))
            .and(query_param("site_id", "7"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [1, 2]})))
            .expect(1)
            .mount(&server)
            .await;

        let mut query = Map::new();
        query.insert("site_id".into(), json!("7"));
        query.insert("limit".into(), json!(5));

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", Some(&query), None)
            .await
            .unwrap();
        assert_eq!(all, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn empty_cursor_ends_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"results": [], "next_cursor": ""})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let all = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, None)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn page_cap_turns_runaway_cursor_into_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": [1], "next_cursor": "again"})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let err = client(&server, Some(3))
            .request_all_items(Method::GET, "/responses", None, None)
            .await
            .unwrap_err();
        assert_eq!(err, HotjarError::PaginationCapExceeded { max_pages: 3 });
    }

    #[tokio::test]
    async fn page_error_aborts_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server, None)
            .request_all_items(Method::GET, "/responses", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[tokio::test]
    async fn typed_items() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let rows: Vec<Row> = client(&server, None)
            .request_all_items_as(Method::GET, "/responses", None, Some(3))
            .await
            .unwrap();
        assert_eq!(rows, vec![Row { id: 0 }, Row { id: 1 }, Row { id: 2 }]);
    }

    #[tokio::test]
    async fn typed_items_reject_wrong_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": ["x"]})))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .request_all_items_as::<Row>(Method::GET, "/responses", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, HotjarError::InvalidResponse(_)));
    }

    #[test]
    fn page_query_adds_size_and_cursor() {
        let query = page_query(None, Some("abc"));
        assert_eq!(query["limit"], 100);
        assert_eq!(query["cursor"], "abc");
        assert!(!page_query(None, None).contains_key("cursor"));
    }
}
