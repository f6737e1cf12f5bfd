//! Aggregation orchestrator for the product composite gateway.
//!
//! Composes reads from the product, recommendation, and review backends
//! into one aggregate, drives the cascading-delete protocol, and drives the
//! fan-out create protocol. The backends are abstracted behind traits so
//! the orchestrator is independent of the transport.

pub mod aggregate;
pub mod composer;
pub mod service;
pub mod services;

pub use aggregate::{ProductAggregate, ProductComposite, RecommendationSummary, ReviewSummary};
pub use service::{CompositeConfig, CompositeService, DeleteMode};
pub use services::{
    CallLog, InMemoryProductBackend, InMemoryRecommendationBackend, InMemoryReviewBackend,
    ProductBackend, RecommendationBackend, ReviewBackend,
};
