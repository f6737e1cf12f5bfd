//! Review backend trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{BackendError, Page, PageMetadata, PageRequest, ProductId, Review, ReviewId};

use super::CallLog;

/// Client-side view of the review backend.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Fetches a review by ID.
    async fn get(&self, id: ReviewId) -> Result<Review, BackendError>;

    /// Fetches one page of reviews for a product.
    ///
    /// Any transport or backend failure degrades to an empty page so a
    /// composite read stays available.
    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Review>;

    /// Creates a review record.
    async fn create(&self, review: Review) -> Result<Review, BackendError>;

    /// Replaces a review record.
    async fn update(&self, id: ReviewId, review: Review) -> Result<Review, BackendError>;

    /// Deletes a review. Deleting a missing record is a no-op.
    async fn delete(&self, id: ReviewId) -> Result<(), BackendError>;
}

#[derive(Debug, Default)]
struct ReviewState {
    reviews: HashMap<ReviewId, Review>,
    fail_on_list: bool,
    fail_create_for: Option<ReviewId>,
}

/// In-memory review backend for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewBackend {
    state: Arc<RwLock<ReviewState>>,
    log: CallLog,
}

impl InMemoryReviewBackend {
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

    /// Seeds a review record directly.
    pub fn insert(&self, review: Review) {
        self.state
            .write()
            .unwrap()
            .reviews
            .insert(review.review_id, review);
    }

    /// Configures list calls to simulate a failing backend.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }

    /// Configures create to reject the review with the given ID.
    pub fn set_fail_create_for(&self, id: ReviewId) {
        self.state.write().unwrap().fail_create_for = Some(id);
    }

    /// Returns the number of stored reviews.
    pub fn review_count(&self) -> usize {
        self.state.read().unwrap().reviews.len()
    }

    /// Returns true if a review exists with the given ID.
    pub fn contains(&self, id: ReviewId) -> bool {
        self.state.read().unwrap().reviews.contains_key(&id)
    }

    /// Returns the call log this backend records into.
    pub fn call_log(&self) -> &CallLog {
        &self.log
    }
}

#[async_trait]
impl ReviewBackend for InMemoryReviewBackend {
    async fn get(&self, id: ReviewId) -> Result<Review, BackendError> {
        self.log.record(format!("review.get {id}"));
        self.state
            .read()
            .unwrap()
            .reviews
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("No review found for id: {id}")))
    }

    async fn list(&self, product_id: ProductId, page: PageRequest) -> Page<Review> {
        self.log
            .record(format!("review.list {product_id} page {}", page.number()));
        let state = self.state.read().unwrap();

        if state.fail_on_list {
            tracing::warn!(%product_id, "review list failed, returning empty page");
            return Page::empty(page);
        }

        let mut items: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        items.sort_by_key(|r| r.review_id);

        let total = items.len() as u64;
        let start = (page.number() as usize).saturating_mul(page.size() as usize);
        let content: Vec<Review> = items
            .into_iter()
            .skip(start)
            .take(page.size() as usize)
            .collect();

        Page::new(content, PageMetadata::new(page.number(), page.size(), total))
    }

    async fn create(&self, review: Review) -> Result<Review, BackendError> {
        self.log
            .record(format!("review.create {}", review.review_id));
        let mut state = self.state.write().unwrap();

        if state.fail_create_for == Some(review.review_id) {
            return Err(BackendError::InvalidInput(format!(
                "Invalid review: {}",
                review.review_id
            )));
        }

        state.reviews.insert(review.review_id, review.clone());
        Ok(review)
    }

    async fn update(&self, id: ReviewId, review: Review) -> Result<Review, BackendError> {
        self.log.record(format!("review.update {id}"));
        let mut state = self.state.write().unwrap();
        if !state.reviews.contains_key(&id) {
            return Err(BackendError::NotFound(format!(
                "No review found for id: {id}"
            )));
        }
        state.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: ReviewId) -> Result<(), BackendError> {
        self.log.record(format!("review.delete {id}"));
        self.state.write().unwrap().reviews.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i32, product_id: i32) -> Review {
        Review {
            review_id: ReviewId::new(id),
            product_id: ProductId::new(product_id),
            author: format!("author-{id}"),
            subject: format!("subject-{id}"),
            content: format!("content-{id}"),
        }
    }

    #[tokio::test]
    async fn test_list_scopes_to_product() {
        let backend = InMemoryReviewBackend::new();
        backend.insert(review(1, 1));
        backend.insert(review(2, 1));
        backend.insert(review(3, 2));

        let page = backend
            .list(ProductId::new(1), PageRequest::new(0, 10).unwrap())
            .await;

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.page.total_elements, 2);
        assert_eq!(page.page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_get_missing_review_is_not_found() {
        let backend = InMemoryReviewBackend::new();
        let err = backend.get(ReviewId::new(4)).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let backend = InMemoryReviewBackend::new();
        backend.insert(review(1, 1));

        backend.delete(ReviewId::new(1)).await.unwrap();
        backend.delete(ReviewId::new(1)).await.unwrap();

        assert_eq!(backend.review_count(), 0);
    }
}
