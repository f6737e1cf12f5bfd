//! Recommendation backend trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{BackendError, Page, PageMetadata, PageRequest, ProductId, Recommendation, RecommendationId};

use super::CallLog;

/// Client-side view of the recommendation backend.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Fetches a recommendation by ID.
    async fn get(&self, id: RecommendationId) -> Result<Recommendation, BackendError>;

    /// Fetches one page of recommendations for a product.
    ///
    /// Any transport or backend failure degrades to an empty page so a
    /// composite read stays available.
    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Recommendation>;

    /// Creates a recommendation record.
    async fn create(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError>;

    /// Replaces a recommendation record.
    async fn update(
        &self,
        id: RecommendationId,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError>;

    /// Deletes a recommendation. Deleting a missing record is a no-op.
    async fn delete(&self, id: RecommendationId) -> Result<(), BackendError>;
}

#[derive(Debug, Default)]
struct RecommendationState {
    recommendations: HashMap<RecommendationId, Recommendation>,
    fail_on_list: bool,
    fail_on_delete: bool,
    fail_create_for: Option<RecommendationId>,
}

/// In-memory recommendation backend for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationBackend {
    state: Arc<RwLock<RecommendationState>>,
    log: CallLog,
}

impl InMemoryRecommendationBackend {
    /// Creates an empty in-memory backend with its own call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend recording its calls into a shared log.
    pub fn with_call_log(log: CallLog) -> Self {
        Self {
            state: Arc::default(),
            log,
        }
    }

    /// Seeds a recommendation record directly.
    pub fn insert(&self, recommendation: Recommendation) {
        self.state
            .write()
            .unwrap()
            .recommendations
            .insert(recommendation.recommendation_id, recommendation);
    }

    /// Configures list calls to simulate a failing backend.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }

    /// Configures delete calls to fail with an unexpected status.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Configures create to reject the recommendation with the given ID.
    pub fn set_fail_create_for(&self, id: RecommendationId) {
        self.state.write().unwrap().fail_create_for = Some(id);
    }

    /// Returns the number of stored recommendations.
    pub fn recommendation_count(&self) -> usize {
        self.state.read().unwrap().recommendations.len()
    }

    /// Returns true if a recommendation exists with the given ID.
    pub fn contains(&self, id: RecommendationId) -> bool {
        self.state.read().unwrap().recommendations.contains_key(&id)
    }

    /// Returns the call log this backend records into.
    pub fn call_log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl RecommendationBackend for InMemoryRecommendationBackend {
    async fn get(&self, id: RecommendationId) -> Result<Recommendation, BackendError> {
        self.log.record(format!("recommendation.get {id}"));
        self.state
            .read()
            .unwrap()
            .recommendations
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                BackendError::NotFound(format!("No recommendation found for id: {id}"))
            })
    }

    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Recommendation> {
        self.log
            .record(format!("recommendation.list {product_id} page {}", page.number()));
        let state = self.state.read().unwrap();

        if state.fail_on_list {
            tracing::warn!(%product_id, "recommendation list failed, returning empty page");
            return Page::empty(page);
        }

        let mut items: Vec<Recommendation> = state
            .recommendations
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        items.sort_by_key(|r| r.recommendation_id);

        let total = items.len() as u64;
        let start = (page.number() as usize).saturating_mul(page.size() as usize);
        let content: Vec<Recommendation> = items
            .into_iter()
            .skip(start)
            .take(page.size() as usize)
            .collect();

        Page::new(content, PageMetadata::new(page.number(), page.size(), total))
    }

    async fn create(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError> {
        self.log.record(format!(
            "recommendation.create {}",
            recommendation.recommendation_id
        ));
        let mut state = self.state.write().unwrap();

        if state.fail_create_for == Some(recommendation.recommendation_id) {
            return Err(BackendError::InvalidInput(format!(
                "Invalid recommendation: {}",
                recommendation.recommendation_id
            )));
        }

        state
            .recommendations
            .insert(recommendation.recommendation_id, recommendation.clone());
        Ok(recommendation)
    }

    async fn update(
        &self,
        id: RecommendationId,
        recommendation: Recommendation,
    ) -> Result<Recommendation, BackendError> {
        self.log.record(format!("recommendation.update {id}"));
        let mut state = self.state.write().unwrap();
        if !state.recommendations.contains_key(&id) {
            return Err(BackendError::NotFound(format!(
                "No recommendation found for id: {id}"
            )));
        }
        state.recommendations.insert(id, recommendation.clone());
        Ok(recommendation)
    }

    async fn delete(&self, id: RecommendationId) -> Result<(), BackendError> {
        self.log.record(format!("recommendation.delete {id}"));
        let mut state = self.state.write().unwrap();

        if state.fail_on_delete {
            return Err(BackendError::UnexpectedStatus {
                status: 500,
                message: "recommendation backend unavailable".to_string(),
            });
        }

        state.recommendations.remove(&id);
        Ok(())
    }
}
