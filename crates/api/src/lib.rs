//! HTTP gateway exposing the composite product API.
//!
//! Fronts the product, recommendation, and review backends with one
//! aggregate resource, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use clients::{ProductClient, RecommendationClient, ReviewClient};
use composite::{
    CompositeConfig, CompositeService, InMemoryProductBackend, InMemoryRecommendationBackend,
    InMemoryReviewBackend, ProductBackend, RecommendationBackend, ReviewBackend,
};
use events::{EventPublisher, InMemoryEventBus};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::composite::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P, R, V, E>(
    state: Arc<AppState<P, R, V, E>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    P: ProductBackend + 'static,
    R: RecommendationBackend + 'static,
    V: ReviewBackend + 'static,
    E: EventPublisher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/product-composite", post(routes::composite::create::<P, R, V, E>))
        .route("/product-composite/{id}", get(routes::composite::get::<P, R, V, E>))
        .route(
            "/product-composite/{id}",
            delete(routes::composite::delete::<P, R, V, E>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by HTTP clients built from the config.
pub fn create_http_state(
    config: &Config,
) -> Arc<AppState<ProductClient, RecommendationClient, ReviewClient, InMemoryEventBus>> {
    let http = reqwest::Client::new();
    let composite = CompositeService::new(
        ProductClient::new(http.clone(), config.product_service_url.as_str()),
        RecommendationClient::new(http.clone(), config.recommendation_service_url.as_str()),
        ReviewClient::new(http, config.review_service_url.as_str()),
        InMemoryEventBus::new(),
        config.composite(),
    );

    Arc::new(AppState { composite })
}

/// Application state over the in-memory backends, for tests.
pub type InMemoryAppState = AppState<
    InMemoryProductBackend,
    InMemoryRecommendationBackend,
    InMemoryReviewBackend,
    InMemoryEventBus,
>;

/// Creates application state backed by in-memory backends, returning the
/// backend handles so callers can seed and inspect them.
pub fn create_in_memory_state(
    config: CompositeConfig,
) -> (
    Arc<InMemoryAppState>,
    InMemoryProductBackend,
    InMemoryRecommendationBackend,
    InMemoryReviewBackend,
    InMemoryEventBus,
) {
    let products = InMemoryProductBackend::new();
    let recommendations = InMemoryRecommendationBackend::new();
    let reviews = InMemoryReviewBackend::new();
    let bus = InMemoryEventBus::new();

    let composite = CompositeService::new(
        products.clone(),
        recommendations.clone(),
        reviews.clone(),
        bus.clone(),
        config,
    );

    (
        Arc::new(AppState { composite }),
        products,
        recommendations,
        reviews,
        bus,
    )
}
