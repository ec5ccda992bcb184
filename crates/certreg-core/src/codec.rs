//! # Record Codec
//!
//! Turns raw request parameters into a [`NewCertificate`]: applies the date
//! defaults, validates the values as received, then parses date text.

use chrono::NaiveDate;

use crate::certificate::{no_expiration, CertificateParams, NewCertificate};
use crate::error::ValidationError;
use crate::validation::{check, DateInput};

/// Storage and wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize request parameters into a certificate awaiting an id.
///
/// An absent `date` becomes `today`; an absent `expires` becomes
/// [`no_expiration`]. Supplied values are validated before parsing, so an
/// `Err` means nothing about the request may be persisted.
pub fn pack(params: &CertificateParams, today: NaiveDate) -> Result<NewCertificate, ValidationError> {
    let date = date_input(params.date.as_deref(), today);
    let expires = date_input(params.expires.as_deref(), no_expiration());

    check(params.name.as_deref(), params.course.as_deref(), date, expires)?;

    // check() guarantees both are present and non-empty.
    let (Some(name), Some(course)) = (params.name.clone(), params.course.clone()) else {
        return Err(ValidationError::MissingField("name"));
    };

    Ok(NewCertificate {
        name,
        course,
        date: resolve("date", date)?,
        expires: resolve("expires", expires)?,
    })
}

fn date_input(text: Option<&str>, default: NaiveDate) -> DateInput<'_> {
    match text {
        Some(text) => DateInput::Text(text),
        None => DateInput::Value(default),
    }
}

fn resolve(field: &'static str, input: DateInput<'_>) -> Result<NaiveDate, ValidationError> {
    match input {
        DateInput::Value(day) => Ok(day),
        DateInput::Text(text) => NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
            ValidationError::NotACalendarDate {
                field,
                value: text.to_string(),
            }
        }),
    }
}
