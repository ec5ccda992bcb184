#![deny(missing_docs)]

//! # certreg-core — Domain Types for the Certificate Registry
//!
//! Everything here is pure: no I/O, no clocks except [`today`]. The HTTP
//! service in `certreg-api` layers storage and transport on top.
//!
//! ## Request path
//!
//! ```text
//! CertificateParams ──codec::pack──▶ NewCertificate ──with_id──▶ Certificate
//!                        │
//!                        └── validation::check (presence, date pattern)
//! ```
//!
//! Certificates are immutable. A stored certificate is either
//! [`Lifecycle::Active`] or [`Lifecycle::Expired`] relative to a reference
//! day; expired records are purged lazily by the service that reads them.

pub mod certificate;
pub mod codec;
pub mod error;
pub mod identity;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use certificate::{
    no_expiration, today, Certificate, CertificateParams, Lifecycle, NewCertificate,
};
pub use codec::{pack, DATE_FORMAT};
pub use error::ValidationError;
pub use identity::CertificateId;
pub use validation::{check, validate, DateInput};
