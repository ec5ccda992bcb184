//! # Request Parameter Extraction
//!
//! Certificate parameters arrive as URL query parameters or as an
//! `application/x-www-form-urlencoded` body, never as JSON. Query values
//! take precedence; the form only fills what the query leaves out.
//!
//! Both sources are decoded as raw key/value pairs rather than straight into
//! [`CertificateParams`], so a repeated key keeps its first value instead of
//! failing the request.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Form, Query};
use certreg_core::CertificateParams;

use crate::error::AppError;

/// Decoded `key=value` pairs in arrival order.
pub type Pairs = Vec<(String, String)>;

/// Merge query and form parameters, mapping a malformed query string to
/// [`AppError::InvalidArguments`].
///
/// ```ignore
/// async fn handler(
///     query: Result<Query<Pairs>, QueryRejection>,
///     form: Option<Form<Pairs>>,
/// ) -> Result<..., AppError> {
///     let params = extract_params(query, form)?;
/// }
/// ```
pub fn extract_params(
    query: Result<Query<Pairs>, QueryRejection>,
    form: Option<Form<Pairs>>,
) -> Result<CertificateParams, AppError> {
    let Query(query) = query.map_err(|err| {
        let reason = err.body_text();
        tracing::info!(%reason, "Invalid arguments");
        AppError::InvalidArguments(reason)
    })?;
    let query = CertificateParams::from_pairs(query);

    Ok(match form {
        Some(Form(form)) => query.or(CertificateParams::from_pairs(form)),
        None => query,
    })
}
