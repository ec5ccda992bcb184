//! # Request Validation
//!
//! Presence and format checks for certificate parameters, run before any
//! value is parsed or persisted.
//!
//! ## Date pattern
//!
//! Date text must look like `YYYY-MM-DD`: a four-digit year, a month in
//! 1–12 and a day in 1–31, month and day each with an optional leading zero.
//! Only digit ranges are checked. `2024-02-30` passes here even though no
//! such day exists; [`crate::codec::pack`] rejects it when parsing.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// A date parameter as the validator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// Caller-supplied text, not yet checked.
    Text(&'a str),
    /// An already-typed date (a server-side default). Always valid.
    Value(NaiveDate),
}

/// Check certificate parameters, reporting the first problem found.
pub fn check(
    name: Option<&str>,
    course: Option<&str>,
    date: DateInput<'_>,
    expires: DateInput<'_>,
) -> Result<(), ValidationError> {
    if name.map_or(true, str::is_empty) {
        return Err(ValidationError::MissingField("name"));
    }
    if course.map_or(true, str::is_empty) {
        return Err(ValidationError::MissingField("course"));
    }
    check_date("date", date)?;
    check_date("expires", expires)?;
    Ok(())
}

/// `true` when [`check`] accepts the parameters.
pub fn validate(
    name: Option<&str>,
    course: Option<&str>,
    date: DateInput<'_>,
    expires: DateInput<'_>,
) -> bool {
    check(name, course, date, expires).is_ok()
}

fn check_date(field: &'static str, input: DateInput<'_>) -> Result<(), ValidationError> {
    match input {
        DateInput::Value(_) => Ok(()),
        DateInput::Text(text) if is_date_text(text) => Ok(()),
        DateInput::Text(text) => Err(ValidationError::MalformedDate {
            field,
            value: text.to_string(),
        }),
    }
}

/// Whether `text` matches the loose `YYYY-MM-DD` pattern described above.
pub fn is_date_text(text: &str) -> bool {
    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    year.len() == 4 && all_digits(year) && in_range(month, 12) && in_range(day, 31)
}

/// One or two ASCII digits whose value lies in `1..=max`.
fn in_range(part: &str, max: u32) -> bool {
    if part.is_empty() || part.len() > 2 || !all_digits(part) {
        return false;
    }
    part.parse::<u32>()
        .map(|v| (1..=max).contains(&v))
        .unwrap_or(false)
}

fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_date() -> DateInput<'static> {
        DateInput::Value(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn accepts_complete_params() {
        assert!(validate(
            Some("Ada"),
            Some("Rust"),
            DateInput::Text("2023-01-01"),
            DateInput::Text("2099-01-01"),
        ));
    }

    #[test]
    fn accepts_defaulted_date_values() {
        assert!(validate(
            Some("Ada"),
            Some("Rust"),
            default_date(),
            default_date()
        ));
    }

    #[test]
    fn rejects_missing_or_empty_name() {
        for name in [None, Some("")] {
            assert_eq!(
                check(name, Some("Rust"), default_date(), default_date()),
                Err(ValidationError::MissingField("name"))
            );
        }
    }

    #[test]
    fn rejects_missing_or_empty_course() {
        for course in [None, Some("")] {
            assert_eq!(
                check(Some("Ada"), course, default_date(), default_date()),
                Err(ValidationError::MissingField("course"))
            );
        }
    }

    #[test]
    fn name_is_checked_before_course() {
        assert_eq!(
            check(None, None, default_date(), default_date()),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn rejects_malformed_date_and_expires() {
        let err = check(
            Some("Ada"),
            Some("Rust"),
            DateInput::Text("2024/01/01"),
            default_date(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MalformedDate { field: "date", .. }));

        let err = check(
            Some("Ada"),
            Some("Rust"),
            default_date(),
            DateInput::Text("abcd-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MalformedDate { field: "expires", .. }));
    }

    #[test]
    fn date_pattern_accepts() {
        for text in [
            "2024-01-01",
            "2024-1-1",
            "2024-12-31",
            "0001-09-09",
            "2024-10-30",
        ] {
            assert!(is_date_text(text), "{text} should be accepted");
        }
    }

    #[test]
    fn date_pattern_rejects() {
        for text in [
            "",
            "2024/01/01",
            "abcd-01-01",
            "24-01-01",
            "20240-01-01",
            "2024-00-01",
            "2024-13-01",
            "2024-01-00",
            "2024-01-32",
            "2024-001-01",
            "2024-01-01-01",
            "2024-01",
            "2024-+1-01",
            " 2024-01-01",
            "2024-01-01T00:00:00",
        ] {
            assert!(!is_date_text(text), "{text:?} should be rejected");
        }
    }

    /// Digit ranges only: day 30 of February passes the pattern. Parsing
    /// later refuses it, see `codec::tests`.
    #[test]
    fn date_pattern_is_not_a_calendar_check() {
        assert!(is_date_text("2024-02-30"));
        assert!(is_date_text("2023-04-31"));
    }
}
