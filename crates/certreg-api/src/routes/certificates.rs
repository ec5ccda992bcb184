//! # Certificate API
//!
//! Thin transport over [`crate::service::CertificateService`]:
//!
//! | Method | Path                 | Success                     |
//! |--------|----------------------|-----------------------------|
//! | PUT    | `/certificates`      | 201 `{id, data}` + Location |
//! | GET    | `/certificates`      | 200 `{data: [...]}`         |
//! | GET    | `/certificates/:id`  | 200 `{id, data}`            |
//! | DELETE | `/certificates/:id`  | 204                         |

use axum::extract::rejection::QueryRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use certreg_core::{Certificate, CertificateId, NewCertificate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_params, Pairs};
use crate::state::AppState;

/// Response for a newly issued certificate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedCertificate {
    /// Generated identifier.
    #[schema(value_type = String)]
    pub id: CertificateId,
    /// The normalized record as stored (without id).
    #[schema(value_type = Object)]
    pub data: NewCertificate,
}

/// Response for a single certificate lookup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateResponse {
    /// Requested identifier.
    #[schema(value_type = String)]
    pub id: CertificateId,
    /// Stored record: `Id`, `name`, `course`, `date`, `expires`.
    #[schema(value_type = Object)]
    pub data: Certificate,
}

/// Response listing every stored certificate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateList {
    /// Stored records, in storage order.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Certificate>,
}

/// Build the certificates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/certificates",
            put(create_certificate).get(list_certificates),
        )
        .route(
            "/certificates/:id",
            get(get_certificate).delete(delete_certificate),
        )
}

/// PUT /certificates — Issue a certificate.
#[utoipa::path(
    put,
    path = "/certificates",
    params(
        ("name" = String, Query, description = "Recipient name"),
        ("course" = String, Query, description = "Course title"),
        ("date" = Option<String>, Query, description = "Issue date, YYYY-MM-DD (default today)"),
        ("expires" = Option<String>, Query, description = "Expiry date, YYYY-MM-DD (default 2099-12-31)"),
    ),
    responses(
        (status = 201, description = "Certificate issued", body = CreatedCertificate),
        (status = 400, description = "Invalid arguments", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
async fn create_certificate(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Option<Form<Pairs>>,
) -> Result<impl IntoResponse, AppError> {
    let params = extract_params(query, form)?;
    let (id, data) = state.certificates.create(&params).await?;

    let location = format!("/certificates/{id}");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedCertificate { id, data }),
    ))
}

/// GET /certificates — List every certificate.
///
/// Expired certificates are included until a lookup by id purges them.
#[utoipa::path(
    get,
    path = "/certificates",
    responses(
        (status = 200, description = "All certificates", body = CertificateList),
    ),
    tag = "certificates"
)]
async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<CertificateList>, AppError> {
    let data = state.certificates.get_all().await?;
    Ok(Json(CertificateList { data }))
}

/// GET /certificates/:id — Fetch one certificate.
///
/// An expired certificate is deleted by this request and reported as 404.
#[utoipa::path(
    get,
    path = "/certificates/{id}",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate found", body = CertificateResponse),
        (status = 404, description = "Unknown or expired", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CertificateResponse>, AppError> {
    let id = CertificateId::new(id);
    let data = state.certificates.get(&id).await?;
    Ok(Json(CertificateResponse { id, data }))
}

/// DELETE /certificates/:id — Revoke a certificate. Idempotent.
#[utoipa::path(
    delete,
    path = "/certificates/{id}",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 204, description = "Deleted (or never existed)"),
    ),
    tag = "certificates"
)]
async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.certificates.delete(&CertificateId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
