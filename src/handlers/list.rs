use crate::error::ApiError;
use crate::models::{item_responses, ItemResponse, SortQuery};
use crate::routes;
use crate::state::AppState;
use crate::store::{SortDirection, SortField};
use axum::{extract::rejection::QueryRejection, extract::Query, extract::State, http::StatusCode, Json};

/// GET /items handler - List all items
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<ItemResponse>>), ApiError> {
    let items = state.store.list().await?;

    tracing::info!("Listed {} items", items.len());
    Ok((StatusCode::OK, Json(item_responses(items))))
}

/// GET /items/sorted handler - List all items ordered by one field
///
/// Query parameters:
/// - field: name, quantity or _id (optional, default: name)
/// - order: asc or desc (optional, default: asc)
#[utoipa::path(
    get,
    path = routes::ITEMS_SORTED,
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted items", body = Vec<ItemResponse>),
        (status = 500, description = "Invalid query parameter or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn sorted_handler(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<Vec<ItemResponse>>), ApiError> {
    let Query(query) = query?;
    let (field, direction) = parse_sort(&query)?;

    let items = state.store.list_sorted(field, direction).await?;

    tracing::info!(
        "Listed {} items sorted by {} ({:?})",
        items.len(),
        field.key(),
        direction
    );
    Ok((StatusCode::OK, Json(item_responses(items))))
}

fn parse_sort(query: &SortQuery) -> Result<(SortField, SortDirection), ApiError> {
    let field = match query.field.as_deref() {
        None | Some("name") => SortField::Name,
        Some("quantity") => SortField::Quantity,
        Some("_id") | Some("id") => SortField::Id,
        Some(other) => {
            return Err(ApiError::InvalidQueryParam(format!(
                "field must be one of: name, quantity, _id, got '{}'",
                other
            )))
        }
    };

    let direction = match query.order.as_deref() {
        None | Some("asc") => SortDirection::Ascending,
        Some("desc") => SortDirection::Descending,
        Some(other) => {
            return Err(ApiError::InvalidQueryParam(format!(
                "order must be one of: asc, desc, got '{}'",
                other
            )))
        }
    };

    Ok((field, direction))
}
