use crate::app::CatalogError;
use crate::domain::toy::{parse_toy_id, CreateToyRequest, Toy, ToyDetail, UpdateToyRequest};
use crate::transport::http::error::{
    payload_rejection, ApiError, FAILED_ADD_TOY, FAILED_DELETE_TOY, FAILED_FETCH_TOY,
    FAILED_FETCH_TOYS, FAILED_UPDATE_TOY,
};
use crate::transport::http::types::{
    AppState, CreatedToyResponse, DeletedToyResponse, ErrorBody, MessageBody, MyToysQuery,
    UpdatedToyResponse,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/toys",
    responses(
        (status = 200, description = "Every toy in the catalog", body = [Toy]),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn list_toys_handler(State(state): State<AppState>) -> Result<Json<Vec<Toy>>, ApiError> {
    let toys = state
        .catalog
        .list_toys()
        .await
        .map_err(|e| ApiError::new(e, FAILED_FETCH_TOYS))?;
    Ok(Json(toys))
}

#[utoipa::path(
    get,
    path = "/my-toys",
    params(MyToysQuery),
    responses(
        (status = 200, description = "Toys listed by the seller", body = [Toy]),
        (status = 400, description = "Missing email or malformed query", body = ErrorBody),
        (status = 404, description = "Seller has no toys", body = MessageBody),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn my_toys_handler(
    State(state): State<AppState>,
    query: Result<Query<MyToysQuery>, QueryRejection>,
) -> Result<Json<Vec<Toy>>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(CatalogError::InvalidQuery(e.body_text()), FAILED_FETCH_TOYS)
    })?;

    let toys = state
        .catalog
        .toys_for_seller(query.email.as_deref())
        .await
        .map_err(|e| ApiError::new(e, FAILED_FETCH_TOYS))?;
    Ok(Json(toys))
}

#[utoipa::path(
    get,
    path = "/toys/{id}",
    params(
        ("id" = String, Path, description = "Toy identifier (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Toy details (without subCategory)", body = ToyDetail),
        (status = 400, description = "Invalid toy ID format", body = ErrorBody),
        (status = 404, description = "Toy not found", body = ErrorBody),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn get_toy_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToyDetail>, ApiError> {
    let toy = state
        .catalog
        .toy_detail(&id)
        .await
        .map_err(|e| ApiError::new(e, FAILED_FETCH_TOY))?;
    Ok(Json(toy))
}

#[utoipa::path(
    post,
    path = "/toys",
    request_body = CreateToyRequest,
    responses(
        (status = 201, description = "Toy added", body = CreatedToyResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn create_toy_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateToyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedToyResponse>), ApiError> {
    let Json(request) = request.map_err(|e| ApiError::new(payload_rejection(e), FAILED_ADD_TOY))?;

    let id = state
        .catalog
        .add_toy(request)
        .await
        .map_err(|e| ApiError::new(e, FAILED_ADD_TOY))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedToyResponse {
            message: "Toy added successfully".to_string(),
            toy_id: id.to_hex(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/toys/{id}",
    params(
        ("id" = String, Path, description = "Toy identifier (24 hex characters)")
    ),
    request_body = UpdateToyRequest,
    responses(
        (status = 200, description = "Toy updated", body = UpdatedToyResponse),
        (status = 400, description = "Invalid toy ID format or payload", body = ErrorBody),
        (status = 404, description = "Toy not found or not updated", body = ErrorBody),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn update_toy_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateToyRequest>, JsonRejection>,
) -> Result<Json<UpdatedToyResponse>, ApiError> {
    // A bad identifier outranks a bad body.
    let Json(request) = request.map_err(|e| {
        let error = match parse_toy_id(&id) {
            Some(_) => payload_rejection(e),
            None => CatalogError::InvalidId,
        };
        ApiError::new(error, FAILED_UPDATE_TOY)
    })?;

    let result = state
        .catalog
        .update_toy(&id, request)
        .await
        .map_err(|e| ApiError::new(e, FAILED_UPDATE_TOY))?;

    Ok(Json(UpdatedToyResponse {
        message: "Toy updated successfully".to_string(),
        result,
    }))
}

#[utoipa::path(
    delete,
    path = "/toys/{id}",
    params(
        ("id" = String, Path, description = "Toy identifier (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Toy deleted", body = DeletedToyResponse),
        (status = 400, description = "Invalid toy ID format", body = ErrorBody),
        (status = 404, description = "Toy not found", body = ErrorBody),
        (status = 500, description = "Store error", body = ErrorBody)
    )
)]
pub async fn delete_toy_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedToyResponse>, ApiError> {
    let result = state
        .catalog
        .remove_toy(&id)
        .await
        .map_err(|e| ApiError::new(e, FAILED_DELETE_TOY))?;

    Ok(Json(DeletedToyResponse {
        message: "Toy deleted successfully".to_string(),
        result,
    }))
}
