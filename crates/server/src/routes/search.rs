use axum::{
    extract::State,
    Json,
};
use models::service::Service;
use serde::Deserialize;

use crate::errors::{ApiError, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free text; absent or blank yields an empty result.
    pub q: Option<String>,
}

#[utoipa::path(
    get, path = "/services/search", tag = "services",
    params(SearchQuery),
    responses((status = 200, description = "Matching services, best first"))
)]
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let hits = state.search.search(query.q.as_deref()).await?;
    Ok(Json(ApiResponse::ok(hits)))
}
