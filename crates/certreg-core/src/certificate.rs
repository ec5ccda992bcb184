//! # Certificate Records
//!
//! A certificate names a recipient, a course, the day it was issued, and the
//! day it stops being valid. Records are immutable once created.
//!
//! Three shapes appear along the request path:
//!
//! - [`CertificateParams`] — raw, untrusted request parameters.
//! - [`NewCertificate`] — a validated, normalized record awaiting an id.
//! - [`Certificate`] — a persisted record keyed by [`CertificateId`].

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::identity::CertificateId;

/// Year of the "never expires" sentinel.
const NO_EXPIRATION_YEAR: i32 = 2099;

/// The sentinel expiry date, 2099-12-31, applied when a caller omits `expires`.
pub fn no_expiration() -> NaiveDate {
    NaiveDate::from_ymd_opt(NO_EXPIRATION_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Today's date on the server's local clock, day precision.
///
/// Both the default issue date and the expiry check use this day, so they
/// follow the host's time zone rather than UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Raw request parameters for issuing a certificate.
///
/// Every field is optional at this stage; presence and format are enforced
/// by [`crate::validation`] and [`crate::codec::pack`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateParams {
    /// Recipient name.
    pub name: Option<String>,
    /// Course or award title.
    pub course: Option<String>,
    /// Issue date as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Expiry date as `YYYY-MM-DD`.
    pub expires: Option<String>,
}

impl CertificateParams {
    /// Collect parameters from decoded `key=value` pairs.
    ///
    /// The first occurrence of a key wins and unknown keys are ignored, so
    /// `name=Ada&name=Grace` yields `Ada`.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut params.name,
                "course" => &mut params.course,
                "date" => &mut params.date,
                "expires" => &mut params.expires,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Fill every absent field from `other`, keeping fields already present.
    pub fn or(self, other: CertificateParams) -> Self {
        Self {
            name: self.name.or(other.name),
            course: self.course.or(other.course),
            date: self.date.or(other.date),
            expires: self.expires.or(other.expires),
        }
    }
}

/// A normalized certificate that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCertificate {
    /// Recipient name, never empty.
    pub name: String,
    /// Course or award title, never empty.
    pub course: String,
    /// Issue date.
    pub date: NaiveDate,
    /// Expiry date; [`no_expiration`] when the caller gave none.
    pub expires: NaiveDate,
}

impl NewCertificate {
    /// Attach an identifier, producing the record as it will be stored.
    pub fn with_id(self, id: CertificateId) -> Certificate {
        Certificate {
            id,
            name: self.name,
            course: self.course,
            date: self.date,
            expires: self.expires,
        }
    }
}

/// A persisted certificate.
///
/// Serializes with the storage column names: `Id`, `name`, `course`,
/// `date`, `expires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Primary key.
    #[serde(rename = "Id")]
    pub id: CertificateId,
    /// Recipient name.
    pub name: String,
    /// Course or award title.
    pub course: String,
    /// Issue date.
    pub date: NaiveDate,
    /// Expiry date.
    pub expires: NaiveDate,
}

impl Certificate {
    /// Classify this record against a reference day.
    ///
    /// A certificate is expired from the start of its `expires` day.
    pub fn lifecycle(&self, today: NaiveDate) -> Lifecycle {
        if self.expires <= today {
            Lifecycle::Expired
        } else {
            Lifecycle::Active
        }
    }
}

/// Lifecycle state of a certificate that still exists in storage.
///
/// A purged certificate has no record left to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `expires` is after today; the record is readable.
    Active,
    /// `expires` is today or earlier but the record has not been purged yet.
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(expires: NaiveDate) -> Certificate {
        NewCertificate {
            name: "Ada".to_string(),
            course: "Rust".to_string(),
            date: day(2023, 1, 1),
            expires,
        }
        .with_id(CertificateId::new("c-1"))
    }

    #[test]
    fn sentinel_is_end_of_2099() {
        assert_eq!(no_expiration(), day(2099, 12, 31));
    }

    #[test]
    fn expired_from_the_expiry_day_itself() {
        let cert = sample(day(2024, 6, 1));
        assert_eq!(cert.lifecycle(day(2024, 5, 31)), Lifecycle::Active);
        assert_eq!(cert.lifecycle(day(2024, 6, 1)), Lifecycle::Expired);
        assert_eq!(cert.lifecycle(day(2024, 6, 2)), Lifecycle::Expired);
    }

    #[test]
    fn sentinel_expiry_is_active_today() {
        assert_eq!(sample(no_expiration()).lifecycle(today()), Lifecycle::Active);
    }

    #[test]
    fn from_pairs_keeps_first_occurrence() {
        let params = CertificateParams::from_pairs([
            ("name", "Ada"),
            ("name", "Grace"),
            ("course", "Rust"),
            ("colour", "blue"),
            ("expires", "2030-01-01"),
        ]);
        assert_eq!(params.name.as_deref(), Some("Ada"));
        assert_eq!(params.course.as_deref(), Some("Rust"));
        assert_eq!(params.date, None);
        assert_eq!(params.expires.as_deref(), Some("2030-01-01"));
    }

    #[test]
    fn from_pairs_keeps_empty_first_value() {
        let params = CertificateParams::from_pairs([("name", ""), ("name", "Ada")]);
        assert_eq!(params.name.as_deref(), Some(""));
    }

    #[test]
    fn params_or_keeps_present_fields() {
        let query = CertificateParams {
            name: Some("Ada".to_string()),
            ..Default::default()
        };
        let form = CertificateParams {
            name: Some("Grace".to_string()),
            course: Some("COBOL".to_string()),
            ..Default::default()
        };
        let merged = query.or(form);
        assert_eq!(merged.name.as_deref(), Some("Ada"));
        assert_eq!(merged.course.as_deref(), Some("COBOL"));
        assert!(merged.date.is_none());
    }

    #[test]
    fn certificate_serializes_with_column_names() {
        let json = serde_json::to_value(sample(day(2099, 1, 1))).unwrap();
        assert_eq!(json["Id"], "c-1");
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["course"], "Rust");
        assert_eq!(json["date"], "2023-01-01");
        assert_eq!(json["expires"], "2099-01-01");
    }
}
