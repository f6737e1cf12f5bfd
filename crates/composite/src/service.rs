//! Composite service driving the read, create, and delete protocols.

use std::time::Instant;

use common::{BackendError, PageRequest, Product, ProductId};
use events::{Channel, DeletionEvent, EventPublisher};

use crate::aggregate::{ProductAggregate, ProductComposite};
use crate::composer;
use crate::services::{ProductBackend, RecommendationBackend, ReviewBackend};

/// Strategy used to remove a composite product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Synchronously drain child collections, then delete the product.
    #[default]
    Cascade,
    /// Publish one deletion event per entity type and return immediately;
    /// each backend performs its own cleanup.
    Events,
}

impl std::str::FromStr for DeleteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cascade" => Ok(DeleteMode::Cascade),
            "events" => Ok(DeleteMode::Events),
            other => Err(format!("unknown delete mode: {other}")),
        }
    }
}

/// Configuration for the composite service, supplied at construction time.
#[derive(Debug, Clone, Copy)]
pub struct CompositeConfig {
    /// Page number used when a read request does not supply one.
    pub default_page_number: u32,
    /// Page size used for defaulted reads and for delete drains. Must be
    /// positive.
    pub default_page_size: u32,
    /// Delete strategy.
    pub delete_mode: DeleteMode,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            default_page_number: 0,
            default_page_size: 10,
            delete_mode: DeleteMode::Cascade,
        }
    }
}

/// Orchestrates composite operations across the three backend services.
///
/// Reads fan out to all three backends and join before composition; the
/// cascading delete drains child collections page by page before removing
/// the product itself.
pub struct CompositeService<P, R, V, E>
where
    P: ProductBackend,
    R: RecommendationBackend,
    V: ReviewBackend,
    E: EventPublisher,
{
    products: P,
    recommendations: R,
    reviews: V,
    publisher: E,
    config: CompositeConfig,
}

impl<P, R, V, E> CompositeService<P, R, V, E>
where
    P: ProductBackend,
    R: RecommendationBackend,
    V: ReviewBackend,
    E: EventPublisher,
{
    /// Creates a new composite service.
    pub fn new(
        products: P,
        recommendations: R,
        reviews: V,
        publisher: E,
        config: CompositeConfig,
    ) -> Self {
        Self {
            products,
            recommendations,
            reviews,
            publisher,
            config,
        }
    }

    /// Returns the configuration the service was constructed with.
    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// Fetches the composite view of one product.
    ///
    /// A missing product fails the whole read; child page fetches run
    /// concurrently and degrade to empty pages on failure.
    #[tracing::instrument(skip(self))]
    pub async fn get_composite(
        &self,
        product_id: ProductId,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<ProductAggregate, BackendError> {
        metrics::counter!("composite_reads_total").increment(1);

        let page = self.resolve_page(page_number, page_size)?;
        let product = self.products.get(product_id).await?;

        let (recommendations, reviews) = tokio::join!(
            self.recommendations.list(product_id, page),
            self.reviews.list(product_id, page),
        );

        Ok(composer::compose(product, recommendations, reviews))
    }

    /// Creates a product and its child records.
    ///
    /// The product is created first and assigns the ID; children follow in
    /// iteration order, each tagged with it. A failure partway leaves the
    /// records created so far in place — creation is not atomic across the
    /// backends.
    #[tracing::instrument(skip(self, body), fields(name = %body.name))]
    pub async fn create_composite(
        &self,
        body: ProductComposite,
    ) -> Result<ProductId, BackendError> {
        metrics::counter!("composite_creates_total").increment(1);

        let created = self
            .products
            .create(Product::unassigned(body.name.clone(), body.weight))
            .await?;
        let product_id = created.product_id;

        for summary in &body.recommendations {
            self.recommendations
                .create(ProductComposite::recommendation_for(summary, product_id))
                .await?;
        }

        for summary in &body.reviews {
            self.reviews
                .create(ProductComposite::review_for(summary, product_id))
                .await?;
        }

        tracing::info!(
            %product_id,
            recommendations = body.recommendations.len(),
            reviews = body.reviews.len(),
            "composite product created"
        );
        Ok(product_id)
    }

    /// Deletes a product and everything owned for it, using the configured
    /// strategy.
    #[tracing::instrument(skip(self))]
    pub async fn delete_composite(&self, product_id: ProductId) -> Result<(), BackendError> {
        metrics::counter!("composite_deletes_total").increment(1);

        match self.config.delete_mode {
            DeleteMode::Cascade => self.delete_cascade(product_id).await,
            DeleteMode::Events => {
                self.publish_deletions(product_id).await;
                Ok(())
            }
        }
    }

    /// Synchronous cascade: all recommendation deletes, then all review
    /// deletes, then the product delete.
    async fn delete_cascade(&self, product_id: ProductId) -> Result<(), BackendError> {
        let start = Instant::now();

        let recommendations_deleted = self.drain_recommendations(product_id).await?;
        let reviews_deleted = self.drain_reviews(product_id).await?;
        self.products.delete(product_id).await?;

        metrics::histogram!("composite_delete_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(
            %product_id,
            recommendations_deleted,
            reviews_deleted,
            "composite product deleted"
        );
        Ok(())
    }

    /// Deletes every recommendation for the product, draining the first
    /// page repeatedly until a fetch comes back empty.
    async fn drain_recommendations(&self, product_id: ProductId) -> Result<u64, BackendError> {
        let first = PageRequest::first(self.config.default_page_size);
        let mut deleted = 0u64;

        loop {
            let page = self.recommendations.list(product_id, first).await;
            if page.is_empty() {
                break;
            }
            for recommendation in page.content {
                self.recommendations
                    .delete(recommendation.recommendation_id)
                    .await?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Deletes every review for the product, same drain loop as for
    /// recommendations.
    async fn drain_reviews(&self, product_id: ProductId) -> Result<u64, BackendError> {
        let first = PageRequest::first(self.config.default_page_size);
        let mut deleted = 0u64;

        loop {
            let page = self.reviews.list(product_id, first).await;
            if page.is_empty() {
                break;
            }
            for review in page.content {
                self.reviews.delete(review.review_id).await?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Event-propagated cascade: one deletion event per entity type,
    /// best-effort, no backend calls from this path.
    async fn publish_deletions(&self, product_id: ProductId) {
        for channel in Channel::ALL {
            self.publisher
                .publish(channel, DeletionEvent::new(product_id))
                .await;
        }
        tracing::info!(%product_id, "deletion events published");
    }

    fn resolve_page(
        &self,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<PageRequest, BackendError> {
        let number = page_number.unwrap_or(i64::from(self.config.default_page_number));
        let size = page_size.unwrap_or(i64::from(self.config.default_page_size));
        Ok(PageRequest::new(number, size)?)
    }
}
