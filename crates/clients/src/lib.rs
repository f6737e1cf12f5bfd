//! HTTP clients for the three backend services.
//!
//! One generic REST client carries the shared request/translation logic;
//! the typed clients wrap it with their resource path and implement the
//! orchestrator's backend traits.

pub mod product;
pub mod recommendation;
pub mod rest;
pub mod review;
mod translate;

pub use product::ProductClient;
pub use recommendation::RecommendationClient;
pub use rest::RestClient;
pub use review::ReviewClient;
