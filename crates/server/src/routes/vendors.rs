use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use models::vendor::{NewVendor, UpdateVendor, Vendor};
use serde_json::{json, Value};
use service::listing::params_from_query;

use crate::errors::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/vendors", tag = "vendors",
    params(
        ("status" = Option<String>, Query, description = "Exact status"),
        ("business_type" = Option<String>, Query, description = "Exact business type"),
        ("name" = Option<String>, Query, description = "Exact name"),
        ("is_verified" = Option<bool>, Query, description = "Verification flag"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 20, max 100"),
        ("sort_by" = Option<String>, Query, description = "Field to sort on"),
        ("sort_order" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "One page of vendors"),
        (status = 400, description = "Malformed filter", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Vendor>>>, ApiError> {
    let page = state.vendors.list_vendors(&params_from_query(q)).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get, path = "/vendors/{id}", tag = "vendors",
    params(("id" = String, Path, description = "Vendor id")),
    responses(
        (status = 200, description = "Vendor"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ApiResponse<Vendor>>, ApiError> {
    state
        .vendors
        .get_vendor(&id)
        .await?
        .map(|v| Json(ApiResponse::ok(v)))
        .ok_or_else(|| ApiError::not_found("vendor", &id))
}

#[utoipa::path(
    post, path = "/vendors", tag = "vendors",
    request_body = crate::openapi::NewVendorDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewVendor>,
) -> Result<(StatusCode, Json<ApiResponse<Vendor>>), ApiError> {
    let vendor = state.vendors.create_vendor(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(vendor))))
}

#[utoipa::path(
    put, path = "/vendors/{id}", tag = "vendors",
    params(("id" = String, Path, description = "Vendor id")),
    request_body = crate::openapi::NewVendorDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateVendor>,
) -> Result<Json<ApiResponse<Vendor>>, ApiError> {
    let vendor = state.vendors.update_vendor(&id, input).await?;
    Ok(Json(ApiResponse::ok(vendor)))
}

#[utoipa::path(
    delete, path = "/vendors/{id}", tag = "vendors",
    params(("id" = String, Path, description = "Vendor id")),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let deleted = state.vendors.delete_vendor(&id).await?;
    let message = if deleted { "vendor deleted" } else { "vendor not found or already deleted" };
    Ok(Json(ApiResponse::ok(json!({"id": id, "deleted": deleted})).with_message(message)))
}
