use utoipa::OpenApi;

use crate::error::{HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::item::{ItemPatch, NewItem};
use crate::models::{
    CountResponse, DeleteManyResponse, DeleteResponse, ItemResponse, NameTotalResponse,
    UpdateAckResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "items-api",
        version = "1.0.0",
        description = "CRUD and query operations over an items collection backed by MongoDB"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::list::sorted_handler,
        handlers::create::create_handler,
        handlers::create::bulk_handler,
        handlers::query::filter_handler,
        handlers::query::quantity_handler,
        handlers::update::update_handler,
        handlers::update::set_quantity_handler,
        handlers::delete::delete_handler,
        handlers::delete::delete_many_handler,
        handlers::stats::count_handler,
        handlers::stats::grouped_handler
    ),
    components(
        schemas(
            NewItem,
            ItemPatch,
            ItemResponse,
            DeleteResponse,
            UpdateAckResponse,
            DeleteManyResponse,
            CountResponse,
            NameTotalResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "items", description = "Item operations")
    )
)]
pub struct ApiDoc;
