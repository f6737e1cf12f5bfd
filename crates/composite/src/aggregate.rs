//! Composite read model and create request body.

use common::{Page, ProductId, Recommendation, RecommendationId, Review, ReviewId};
use serde::{Deserialize, Serialize};

/// Public projection of a recommendation, without the owning product key
/// or authorship timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: RecommendationId,
    pub author: String,
    pub rate: i32,
    pub content: String,
}

impl From<Recommendation> for RecommendationSummary {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            recommendation_id: recommendation.recommendation_id,
            author: recommendation.author,
            rate: recommendation.rate,
            content: recommendation.content,
        }
    }
}

/// Public projection of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: ReviewId,
    pub author: String,
    pub subject: String,
    pub content: String,
}

impl From<Review> for ReviewSummary {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.review_id,
            author: review.author,
            subject: review.subject,
            content: review.content,
        }
    }
}

/// Root read model returned to a gateway caller.
///
/// Built fresh per request; never constructed when the product backend has
/// no record for the requested ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: ProductId,
    pub name: String,
    pub weight: i32,
    pub recommendations: Page<RecommendationSummary>,
    pub reviews: Page<ReviewSummary>,
}

/// Request body for creating a composite product.
///
/// The product ID is assigned by the product backend; child IDs are
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComposite {
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub recommendations: Vec<RecommendationSummary>,
    #[serde(default)]
    pub reviews: Vec<ReviewSummary>,
}

impl ProductComposite {
    /// Expands a child summary into the full recommendation record, tagged
    /// with the owning product.
    pub fn recommendation_for(
        summary: &RecommendationSummary,
        product_id: ProductId,
    ) -> Recommendation {
        Recommendation {
            recommendation_id: summary.recommendation_id,
            product_id,
            author: summary.author.clone(),
            rate: summary.rate,
            content: summary.content.clone(),
        }
    }

    /// Expands a child summary into the full review record.
    pub fn review_for(summary: &ReviewSummary, product_id: ProductId) -> Review {
        Review {
            review_id: summary.review_id,
            product_id,
            author: summary.author.clone(),
            subject: summary.subject.clone(),
            content: summary.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_drops_product_key() {
        let recommendation = Recommendation {
            recommendation_id: RecommendationId::new(1),
            product_id: ProductId::new(9),
            author: "ada".to_string(),
            rate: 5,
            content: "great".to_string(),
        };
        let summary = RecommendationSummary::from(recommendation);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("productId").is_none());
        assert_eq!(json["recommendationId"], 1);
    }

    #[test]
    fn composite_body_defaults_children_to_empty() {
        let body: ProductComposite =
            serde_json::from_str(r#"{"name":"widget","weight":10}"#).unwrap();
        assert!(body.recommendations.is_empty());
        assert!(body.reviews.is_empty());
    }

    #[test]
    fn child_expansion_tags_the_product() {
        let summary = ReviewSummary {
            review_id: ReviewId::new(3),
            author: "bob".to_string(),
            subject: "ok".to_string(),
            content: "fine".to_string(),
        };
        let review = ProductComposite::review_for(&summary, ProductId::new(7));
        assert_eq!(review.product_id, ProductId::new(7));
        assert_eq!(review.review_id, ReviewId::new(3));
    }
}
