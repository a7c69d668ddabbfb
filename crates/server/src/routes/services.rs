use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use models::service::{NewService, Service, UpdateService};
use serde_json::{json, Value};
use service::catalog::ServiceDetails;
use service::listing::{params_from_body, params_from_query};
use tracing::info;

use crate::errors::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(
        ("category" = Option<String>, Query, description = "Exact category"),
        ("vendor_id" = Option<String>, Query, description = "Owning vendor id"),
        ("min_price" = Option<f64>, Query, description = "Inclusive lower bound on base_price"),
        ("max_price" = Option<f64>, Query, description = "Inclusive upper bound on base_price"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags; matches any"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 20, max 100"),
        ("sort_by" = Option<String>, Query, description = "Field to sort on"),
        ("sort_order" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "One page of services"),
        (status = 400, description = "Malformed filter", body = crate::openapi::ErrorBody),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let page = state.catalog.list_services(&params_from_query(q)).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post, path = "/services/filter", tag = "services",
    request_body = crate::openapi::ServiceFilterDoc,
    responses(
        (status = 200, description = "One page of services"),
        (status = 400, description = "Malformed filter", body = crate::openapi::ErrorBody)
    )
)]
pub async fn filter(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let params = params_from_body(body)?;
    let page = state.catalog.filter_services(&params).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service with vendorDetails"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ApiResponse<ServiceDetails>>, ApiError> {
    match state.catalog.get_service_details(&id).await? {
        Some(details) => Ok(Json(ApiResponse::ok(details))),
        None => Err(ApiError::not_found("service", &id)),
    }
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewService>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>), ApiError> {
    let created = state.catalog.create_service(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateService>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let updated = state.catalog.update_service(&id, input).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let deleted = state.catalog.delete_service(&id).await?;
    info!(%id, deleted, "delete service request");
    let message = if deleted { "service deleted" } else { "service not found or already deleted" };
    Ok(Json(ApiResponse::ok(json!({"id": id, "deleted": deleted})).with_message(message)))
}
