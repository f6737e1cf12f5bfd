use serde::{Deserialize, Serialize};

/// Unique identifier for a product.
///
/// Wraps the backend-assigned integer key to prevent mixing up product IDs
/// with the other entity identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    /// Marks a create request whose ID the product backend will assign.
    pub const UNASSIGNED: ProductId = ProductId(0);

    /// Creates a product ID from a raw integer key.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying integer key.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Unique identifier for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationId(i32);

impl RecommendationId {
    /// Creates a recommendation ID from a raw integer key.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying integer key.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RecommendationId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Unique identifier for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i32);

impl ReviewId {
    /// Creates a review ID from a raw integer key.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying integer key.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ReviewId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
