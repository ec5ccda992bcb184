//! # Certificate Lifecycle Service
//!
//! Orchestrates validation, id generation, and expiry around the
//! [`CertificateStore`]. The transport layer calls only this service.
//!
//! ## Lazy expiry
//!
//! Nothing sweeps expired certificates in the background. [`CertificateService::get`]
//! is the only place expiry is enforced: when it finds a record whose
//! `expires` day is today or earlier, it **deletes the record** and reports
//! [`ServiceError::Expired`]. A read therefore mutates storage. Listing with
//! [`CertificateService::get_all`] never filters or purges, so an expired
//! certificate keeps appearing in listings until someone fetches it by id
//! (or deletes it).
//!
//! ```text
//! Active ──(time passes)──▶ Expired ──get()/delete()──▶ Purged
//!    └──────────────────delete()───────────────────────────┘
//! ```

use certreg_core::{
    pack, today, Certificate, CertificateId, CertificateParams, Lifecycle, NewCertificate,
    ValidationError,
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::db::CertificateStore;

/// Failure of a lifecycle operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Parameters failed validation or parsing. Nothing was written.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No certificate has this id.
    #[error("certificate {0} not found")]
    NotFound(CertificateId),

    /// The certificate existed but had expired; it has now been deleted.
    #[error("certificate {0} expired")]
    Expired(CertificateId),

    /// The storage engine failed.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// The four certificate operations exposed to the HTTP layer.
#[derive(Debug, Clone)]
pub struct CertificateService {
    store: CertificateStore,
    clock: fn() -> NaiveDate,
}

impl CertificateService {
    /// Build the service over an opened store, reading dates from the server clock.
    pub fn new(store: CertificateStore) -> Self {
        Self {
            store,
            clock: today,
        }
    }

    /// Replace the source of "today" (default dates and expiry checks).
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &CertificateStore {
        &self.store
    }

    /// Validate and persist a new certificate.
    ///
    /// Returns the generated id and the normalized record as stored.
    pub async fn create(
        &self,
        params: &CertificateParams,
    ) -> Result<(CertificateId, NewCertificate), ServiceError> {
        let record = pack(params, (self.clock)()).map_err(|err| {
            tracing::info!(?params, reason = %err, "Invalid arguments");
            err
        })?;

        let id = self.store.insert(&record).await?;
        tracing::info!(certificate_id = %id, "certificate issued");
        Ok((id, record))
    }

    /// Every stored certificate, expired ones included. Does not purge.
    pub async fn get_all(&self) -> Result<Vec<Certificate>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    /// Fetch one certificate, purging it if it has expired.
    ///
    /// An expired record is deleted before this returns
    /// [`ServiceError::Expired`]; later calls for the same id see
    /// [`ServiceError::NotFound`].
    pub async fn get(&self, id: &CertificateId) -> Result<Certificate, ServiceError> {
        let Some(certificate) = self.store.get(id).await? else {
            tracing::info!(certificate_id = %id, "No data for id");
            return Err(ServiceError::NotFound(id.clone()));
        };

        match certificate.lifecycle((self.clock)()) {
            Lifecycle::Active => Ok(certificate),
            Lifecycle::Expired => {
                tracing::info!(
                    certificate_id = %id,
                    expires = %certificate.expires,
                    "Certificate expired for id"
                );
                self.store.delete(id).await?;
                Err(ServiceError::Expired(id.clone()))
            }
        }
    }

    /// Delete a certificate. Succeeds whether or not it existed.
    pub async fn delete(&self, id: &CertificateId) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        tracing::info!(certificate_id = %id, "certificate deleted");
        Ok(())
    }
}
