//! Backend service traits and in-memory implementations.

pub mod product;
pub mod recommendation;
pub mod review;

pub use product::{InMemoryProductBackend, ProductBackend};
pub use recommendation::{InMemoryRecommendationBackend, RecommendationBackend};
pub use review::{InMemoryReviewBackend, ReviewBackend};

use std::sync::{Arc, RwLock};

/// Records backend operations in invocation order.
///
/// The in-memory backends log every call here; sharing one log across all
/// three lets tests assert cross-backend ordering (e.g. that all child
/// deletions precede the product deletion).
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one operation to the log.
    pub fn record(&self, operation: impl Into<String>) {
        self.calls.write().unwrap().push(operation.into());
    }

    /// Returns a snapshot of all recorded operations.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Returns how many recorded operations start with the given prefix.
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}
