//! HTTP client for the review backend.

use async_trait::async_trait;
use common::{BackendError, Page, PageRequest, ProductId, Review, ReviewId};
use composite::ReviewBackend;

use crate::rest::RestClient;

/// Review backend over HTTP.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    rest: RestClient,
}

impl ReviewClient {
    /// Creates a client for the review backend at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            rest: RestClient::new(http, base_url, "review"),
        }
    }
}

#[async_trait]
impl ReviewBackend for ReviewClient {
    async fn get(&self, id: ReviewId) -> Result<Review, BackendError> {
        self.rest.get(id.as_i32()).await
    }

    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Review> {
        self.rest.list("productId", product_id.as_i32(), page).await
    }

    async fn create(&self, review: Review) -> Result<Review, BackendError> {
        self.rest.create(&review).await
    }

    async fn update(&self, id: ReviewId, review: Review) -> Result<Review, BackendError> {
        self.rest.update(id.as_i32(), &review).await
    }

    async fn delete(&self, id: ReviewId) -> Result<(), BackendError> {
        self.rest.delete(id.as_i32()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn delete_hits_entity_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/review/3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReviewClient::new(reqwest::Client::new(), server.uri());
        client.delete(ReviewId::new(3)).await.unwrap();
    }

    #[tokio::test]
    async fn list_degrades_on_backend_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/review"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = ReviewClient::new(reqwest::Client::new(), server.uri());
        let page = client
            .list(ProductId::new(1), PageRequest::new(0, 10).unwrap())
            .await;

        assert!(page.is_empty());
        assert_eq!(page.page.total_pages, 1);
    }
}
