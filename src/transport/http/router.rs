use crate::domain::toy::{CreateToyRequest, Toy, ToyDetail, UpdateToyRequest};
use crate::storage::toys::{DeleteOutcome, UpdateOutcome};
use crate::transport::http::handlers::{health, toys};
use crate::transport::http::types::{
    AppState, CreatedToyResponse, DeletedToyResponse, ErrorBody, HealthResponse, MessageBody,
    UpdatedToyResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::healthcheck_handler,
        toys::list_toys_handler,
        toys::my_toys_handler,
        toys::get_toy_handler,
        toys::create_toy_handler,
        toys::update_toy_handler,
        toys::delete_toy_handler
    ),
    components(schemas(
        Toy,
        ToyDetail,
        CreateToyRequest,
        UpdateToyRequest,
        CreatedToyResponse,
        UpdatedToyResponse,
        DeletedToyResponse,
        UpdateOutcome,
        DeleteOutcome,
        ErrorBody,
        MessageBody,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Catalog routes only, with state attached.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/toys",
            get(toys::list_toys_handler).post(toys::create_toy_handler),
        )
        .route("/my-toys", get(toys::my_toys_handler))
        .route(
            "/toys/:id",
            get(toys::get_toy_handler)
                .put(toys::update_toy_handler)
                .delete(toys::delete_toy_handler),
        )
        .with_state(app_state)
}

/// The full application: catalog routes, Swagger UI, permissive CORS and
/// request tracing.
pub fn build_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
