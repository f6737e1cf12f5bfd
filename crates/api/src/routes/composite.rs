//! Composite product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::ProductId;
use composite::{
    CompositeService, ProductAggregate, ProductBackend, ProductComposite, RecommendationBackend,
    ReviewBackend,
};
use events::EventPublisher;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<P, R, V, E>
where
    P: ProductBackend,
    R: RecommendationBackend,
    V: ReviewBackend,
    E: EventPublisher,
{
    pub composite: CompositeService<P, R, V, E>,
}

/// Optional pagination query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCreatedResponse {
    pub product_id: ProductId,
}

/// GET /product-composite/{id} — the composite view of one product.
#[tracing::instrument(skip(state))]
pub async fn get<P, R, V, E>(
    State(state): State<Arc<AppState<P, R, V, E>>>,
    Path(id): Path<i32>,
    Query(params): Query<PageParams>,
) -> Result<Json<ProductAggregate>, ApiError>
where
    P: ProductBackend + 'static,
    R: RecommendationBackend + 'static,
    V: ReviewBackend + 'static,
    E: EventPublisher + 'static,
{
    let aggregate = state
        .composite
        .get_composite(ProductId::new(id), params.page_number, params.page_size)
        .await
        .map_err(|err| ApiError::from_backend(format!("/product-composite/{id}"), err))?;

    Ok(Json(aggregate))
}

/// POST /product-composite — create a product with its child records.
#[tracing::instrument(skip(state, body))]
pub async fn create<P, R, V, E>(
    State(state): State<Arc<AppState<P, R, V, E>>>,
    Json(body): Json<ProductComposite>,
) -> Result<(StatusCode, Json<CompositeCreatedResponse>), ApiError>
where
    P: ProductBackend + 'static,
    R: RecommendationBackend + 'static,
    V: ReviewBackend + 'static,
    E: EventPublisher + 'static,
{
    let product_id = state
        .composite
        .create_composite(body)
        .await
        .map_err(|err| ApiError::from_backend("/product-composite", err))?;

    Ok((
        StatusCode::CREATED,
        Json(CompositeCreatedResponse { product_id }),
    ))
}

/// DELETE /product-composite/{id} — remove a product and everything owned
/// for it.
#[tracing::instrument(skip(state))]
pub async fn delete<P, R, V, E>(
    State(state): State<Arc<AppState<P, R, V, E>>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError>
where
    P: ProductBackend + 'static,
    R: RecommendationBackend + 'static,
    V: ReviewBackend + 'static,
    E: EventPublisher + 'static,
{
    state
        .composite
        .delete_composite(ProductId::new(id))
        .await
        .map_err(|err| ApiError::from_backend(format!("/product-composite/{id}"), err))?;

    Ok(StatusCode::OK)
}
