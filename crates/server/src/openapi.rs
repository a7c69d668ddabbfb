use std::collections::HashMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// VALIDATION_ERROR, NOT_FOUND, STORE_ERROR or INTERNAL_ERROR
    pub code: String,
}

#[derive(ToSchema)]
pub struct ServiceFilterDoc {
    pub category: Option<String>,
    pub vendor_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub page: Option<u32>,
    #[allow(non_snake_case)]
    pub pageSize: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(ToSchema)]
pub struct NewServiceDoc {
    pub id: Option<String>,
    /// language code -> text
    pub name: HashMap<String, String>,
    pub description: Option<HashMap<String, String>>,
    pub category: String,
    /// atomic, composite or package
    pub service_type: Option<String>,
    pub base_price: Option<f64>,
    pub currency: Option<String>,
    pub vendor_id: String,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactDoc {
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<HashMap<String, String>>,
}

#[derive(ToSchema)]
pub struct NewVendorDoc {
    pub id: Option<String>,
    pub name: String,
    pub contact: Option<ContactDoc>,
    pub status: Option<String>,
    pub is_verified: Option<bool>,
    pub legal_name: Option<String>,
    pub business_type: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::filter,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::search::search,
        crate::routes::vendors::list,
        crate::routes::vendors::get,
        crate::routes::vendors::create,
        crate::routes::vendors::update,
        crate::routes::vendors::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            ServiceFilterDoc,
            NewServiceDoc,
            ContactDoc,
            NewVendorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "vendors")
    )
)]
pub struct ApiDoc;
