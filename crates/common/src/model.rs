//! Wire entities exchanged with the three backend services.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, RecommendationId, ReviewId};

/// A product record as held by the product backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub weight: i32,
}

impl Product {
    /// Creates a product with a known identifier.
    pub fn new(product_id: ProductId, name: impl Into<String>, weight: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            weight,
        }
    }

    /// Creates a product for a create request; the backend assigns the ID.
    pub fn unassigned(name: impl Into<String>, weight: i32) -> Self {
        Self::new(ProductId::UNASSIGNED, name, weight)
    }
}

/// A recommendation record as held by the recommendation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation_id: RecommendationId,
    pub product_id: ProductId,
    pub author: String,
    pub rate: i32,
    pub content: String,
}

/// A review record as held by the review backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    pub subject: String,
    pub content: String,
}
