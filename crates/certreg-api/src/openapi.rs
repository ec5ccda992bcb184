//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented certificate routes into a single
//! OpenAPI document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Certificate Registry API",
        version = "0.1.0",
        description = "Issue, list, fetch, and revoke course certificates.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::certificates::create_certificate,
        crate::routes::certificates::list_certificates,
        crate::routes::certificates::get_certificate,
        crate::routes::certificates::delete_certificate,
    ),
    components(schemas(
        crate::routes::certificates::CreatedCertificate,
        crate::routes::certificates::CertificateResponse,
        crate::routes::certificates::CertificateList,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "certificates", description = "Certificate lifecycle"),
    )
)]
pub struct ApiDoc;

/// Build the router serving `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_certificate_paths() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_value(&spec).unwrap();
        let paths = json["paths"].as_object().unwrap();
        assert!(paths.contains_key("/certificates"));
        assert!(paths.contains_key("/certificates/{id}"));
        assert!(json["paths"]["/certificates"]["put"].is_object());
        assert!(json["paths"]["/certificates"]["get"].is_object());
        assert!(json["paths"]["/certificates/{id}"]["get"].is_object());
        assert!(json["paths"]["/certificates/{id}"]["delete"].is_object());
    }
}
