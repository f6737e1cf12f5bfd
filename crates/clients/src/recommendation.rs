//! HTTP client for the recommendation backend.

use async_trait::async_trait;
use common::{BackendError, Page, PageRequest, ProductId, Recommendation, RecommendationId};
use composite::RecommendationBackend;

use crate::rest::RestClient;

/// Recommendation backend over HTTP.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    rest: RestClient,
}

impl RecommendationClient {
    /// Creates a client for the recommendation backend at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            rest: RestClient::new(http, base_url, "recommendation"),
        }
    }
}

#[async_trait]
impl RecommendationBackend for RecommendationClient {
    async fn get(&self, id: RecommendationId) -> Result<Recommendation, BackendError> {
        self.rest.get(id.as_i32()).await
    }

    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Recommendation> {
        self.rest.list("productId", product_id.as_i32(), page).await
    }

    async fn create(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError> {
        self.rest.create(&recommendation).await
    }

    async fn update(
        &self,
        id: RecommendationId,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError> {
        self.rest.update(id.as_i32(), &recommendation).await
    }

    async fn delete(&self, id: RecommendationId) -> Result<(), BackendError> {
        self.rest.delete(id.as_i32()).await
    }
}
