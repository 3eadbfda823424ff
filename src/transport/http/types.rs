use crate::app::CatalogService;
use crate::storage::toys::{DeleteOutcome, UpdateOutcome};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyToysQuery {
    /// Seller email to filter by (exact match).
    pub email: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedToyResponse {
    pub message: String,
    /// Identifier assigned by the store (24 hex characters).
    pub toy_id: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct UpdatedToyResponse {
    pub message: String,
    pub result: UpdateOutcome,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeletedToyResponse {
    pub message: String,
    pub result: DeleteOutcome,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
