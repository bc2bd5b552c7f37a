use crate::error::ApiError;
use crate::models::{item_responses, ItemResponse, NameQuery, QuantityQuery};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::QueryRejection, extract::Query, extract::State, http::StatusCode, Json};

/// GET /items/filter handler - Items whose name matches exactly
#[utoipa::path(
    get,
    path = routes::ITEMS_FILTER,
    params(NameQuery),
    responses(
        (status = 200, description = "Matching items, possibly none", body = Vec<ItemResponse>),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn filter_handler(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<ItemResponse>>), ApiError> {
    let Query(query) = query?;

    let items = state.store.find_by_name(&query.name).await?;

    tracing::info!("Found {} items named {:?}", items.len(), query.name);
    Ok((StatusCode::OK, Json(item_responses(items))))
}

/// GET /items/quantity handler - Items with quantity above a threshold
#[utoipa::path(
    get,
    path = routes::ITEMS_QUANTITY,
    params(QuantityQuery),
    responses(
        (status = 200, description = "Items with quantity > gt", body = Vec<ItemResponse>),
        (status = 500, description = "Invalid query parameter or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn quantity_handler(
    State(state): State<AppState>,
    query: Result<Query<QuantityQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<ItemResponse>>), ApiError> {
    let Query(query) = query?;

    let items = state.store.find_by_quantity_greater_than(query.gt).await?;

    tracing::info!("Found {} items with quantity > {}", items.len(), query.gt);
    Ok((StatusCode::OK, Json(item_responses(items))))
}
