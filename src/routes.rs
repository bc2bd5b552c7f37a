// Route path constants - single source of truth for all API paths

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
pub const ITEMS_BULK: &str = "/items/bulk";
pub const ITEMS_FILTER: &str = "/items/filter";
pub const ITEMS_QUANTITY: &str = "/items/quantity";
pub const ITEMS_SORTED: &str = "/items/sorted";
pub const ITEMS_GROUPED: &str = "/items/grouped";
pub const ITEMS_COUNT: &str = "/items/count";
pub const ITEMS_DELETE_MANY: &str = "/items/deleteMany";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Full application router: item routes, health, API docs and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(ITEMS, get(handlers::list_handler).post(handlers::create_handler))
        .route(ITEMS_BULK, post(handlers::bulk_handler))
        .route(ITEMS_FILTER, get(handlers::filter_handler))
        .route(ITEMS_QUANTITY, get(handlers::quantity_handler))
        .route(ITEMS_SORTED, get(handlers::sorted_handler))
        .route(ITEMS_GROUPED, get(handlers::grouped_handler))
        .route(ITEMS_COUNT, get(handlers::count_handler))
        .route(ITEMS_DELETE_MANY, delete(handlers::delete_many_handler))
        .route(
            ITEM,
            put(handlers::update_handler)
                .patch(handlers::set_quantity_handler)
                .delete(handlers::delete_handler),
        )
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
