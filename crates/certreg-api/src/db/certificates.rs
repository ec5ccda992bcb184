//! Certificate persistence operations.
//!
//! All operations act on the `certificate` table. Each one checks a
//! connection out of the pool for exactly one statement; the guard returns
//! it on every exit path, including errors. The store never interprets
//! expiry; that belongs to the service.

use certreg_core::{Certificate, CertificateId, NewCertificate};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Handle to the certificate table.
#[derive(Debug, Clone)]
pub struct CertificateStore {
    pool: SqlitePool,
}

impl CertificateStore {
    /// Wrap a pool and ensure the table exists.
    pub async fn open(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let store = Self { pool };
        store.create_table().await?;
        Ok(store)
    }

    /// Create the `certificate` table if it is absent. Idempotent.
    pub async fn create_table(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS certificate (
                Id      TEXT     NOT NULL PRIMARY KEY,
                name    TEXT     NOT NULL,
                course  TEXT     NOT NULL,
                date    DATETIME NOT NULL,
                expires DATETIME NOT NULL
            )",
        )
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Generate a fresh id and write the full row. Returns the new id.
    pub async fn insert(&self, record: &NewCertificate) -> Result<CertificateId, sqlx::Error> {
        let id = CertificateId::generate();
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO certificate (Id, name, course, date, expires)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&record.name)
        .bind(&record.course)
        .bind(record.date)
        .bind(record.expires)
        .execute(&mut *conn)
        .await?;
        Ok(id)
    }

    /// Point lookup by primary key.
    pub async fn get(&self, id: &CertificateId) -> Result<Option<Certificate>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, CertificateRow>(
            "SELECT Id, name, course, date, expires FROM certificate WHERE Id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(CertificateRow::into_record))
    }

    /// Remove a certificate. Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: &CertificateId) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM certificate WHERE Id = ?")
            .bind(id.as_str())
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            certificate_id = %id,
            rows = result.rows_affected(),
            "delete executed"
        );
        Ok(())
    }

    /// Every stored certificate, in storage order.
    pub async fn list_all(&self) -> Result<Vec<Certificate>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, CertificateRow>(
            "SELECT Id, name, course, date, expires FROM certificate",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(CertificateRow::into_record).collect())
    }

    /// Round-trip a trivial statement; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CertificateRow {
    #[sqlx(rename = "Id")]
    id: String,
    name: String,
    course: String,
    date: NaiveDate,
    expires: NaiveDate,
}

impl CertificateRow {
    fn into_record(self) -> Certificate {
        Certificate {
            id: CertificateId::new(self.id),
            name: self.name,
            course: self.course,
            date: self.date,
            expires: self.expires,
        }
    }
}
