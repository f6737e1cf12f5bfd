//! Pure composition of backend results into the aggregate read model.

use common::{Page, Product, Recommendation, Review};

use crate::aggregate::{ProductAggregate, RecommendationSummary, ReviewSummary};

/// Assembles the composite read model from the three backend results.
///
/// Projects each child entity down to its summary fields and preserves the
/// page metadata unchanged. No I/O.
pub fn compose(
    product: Product,
    recommendations: Page<Recommendation>,
    reviews: Page<Review>,
) -> ProductAggregate {
    ProductAggregate {
        product_id: product.product_id,
        name: product.name,
        weight: product.weight,
        recommendations: recommendations.map(RecommendationSummary::from),
        reviews: reviews.map(ReviewSummary::from),
    }
}
