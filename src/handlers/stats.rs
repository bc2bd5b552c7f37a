use crate::error::ApiError;
use crate::models::{CountResponse, NameTotalResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /items/count handler - Total number of items
#[utoipa::path(
    get,
    path = routes::ITEMS_COUNT,
    responses(
        (status = 200, description = "Item count", body = CountResponse),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn count_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CountResponse>), ApiError> {
    let total_items = state.store.count_all().await?;

    tracing::info!("Counted {} items", total_items);
    Ok((StatusCode::OK, Json(CountResponse { total_items })))
}

/// GET /items/grouped handler - Total quantity per distinct name
#[utoipa::path(
    get,
    path = routes::ITEMS_GROUPED,
    responses(
        (status = 200, description = "One entry per distinct name, ordered by name", body = Vec<NameTotalResponse>),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn grouped_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<NameTotalResponse>>), ApiError> {
    let totals = state.store.group_by_name_sum().await?;

    tracing::info!("Grouped items into {} names", totals.len());
    Ok((
        StatusCode::OK,
        Json(totals.into_iter().map(NameTotalResponse::from).collect()),
    ))
}
