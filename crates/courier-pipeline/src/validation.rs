// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Business rules for recognised documents: format allow-list and maximum
// submission age. Pure functions, no I/O, no ambient time.

use chrono::{DateTime, Duration, Utc};
use courier_core::config::ValidationPolicy;
use courier_core::error::{CourierError, Result, Staleness, ValidationFailure};
use courier_core::types::Document;

/// `Some(format)` when the document's format is not on the allow-list.
pub fn check_format(document: &Document, policy: &ValidationPolicy) -> Option<String> {
    let format = document.format();
    if policy.allowed_formats.iter().any(|allowed| allowed == format) {
        None
    } else {
        Some(format.to_owned())
    }
}

/// `Some(staleness)` when the document was created strictly more than
/// `policy.max_age` before `now`.
///
/// Documents dated in the future have a negative age and pass.
pub fn check_age(
    document: &Document,
    now: DateTime<Utc>,
    policy: &ValidationPolicy,
) -> Option<Staleness> {
    let age = now.signed_duration_since(document.created());
    if age <= policy.max_age {
        return None;
    }
    Some(Staleness {
        age_days: ceil_days(age),
        max_age_days: policy.max_age_days(),
    })
}

/// Apply both rules. The document is handed back untouched when it passes;
/// otherwise the error reports every rule it broke.
pub fn validate(
    document: Document,
    now: DateTime<Utc>,
    policy: &ValidationPolicy,
) -> Result<Document> {
    let failure = ValidationFailure {
        unsupported_format: check_format(&document, policy),
        stale: check_age(&document, now, policy),
    };
    if failure.is_empty() {
        Ok(document)
    } else {
        Err(CourierError::Validation(failure))
    }
}

// Partial days count as a whole day, so "30 days and one second" reads as 31.
fn ceil_days(age: Duration) -> i64 {
    let days = age.num_days();
    if age > Duration::days(days) { days + 1 } else { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
    }

    fn doc(format: &str, created: DateTime<Utc>) -> Document {
        Document::new("report.xml", b"body".to_vec(), created, format)
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    #[test]
    fn accepts_allowed_formats_within_window() {
        let policy = ValidationPolicy::default();
        for format in ["4.0", "3.1"] {
            for days in [0, 30] {
                let d = doc(format, days_ago(days));
                assert!(
                    validate(d.clone(), now(), &policy).is_ok(),
                    "format {format}, {days} days"
                );
            }
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let policy = ValidationPolicy::default();
        let err = validate(doc("1.0", days_ago(0)), now(), &policy).unwrap_err();
        match err {
            CourierError::Validation(failure) => {
                assert_eq!(failure.unsupported_format.as_deref(), Some("1.0"));
                assert!(failure.stale.is_none());
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn rejects_stale_document() {
        let policy = ValidationPolicy::default();
        let err = validate(doc("4.0", days_ago(32)), now(), &policy).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid document: document is 32 days old (maximum 30 days)"
        );
    }

    #[test]
    fn reports_both_failures_together() {
        let policy = ValidationPolicy::default();
        let err = validate(doc("wrong", days_ago(32)), now(), &policy).unwrap_err();
        match err {
            CourierError::Validation(failure) => {
                assert_eq!(failure.unsupported_format.as_deref(), Some("wrong"));
                assert_eq!(
                    failure.stale,
                    Some(Staleness {
                        age_days: 32,
                        max_age_days: 30
                    })
                );
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn one_second_past_the_window_is_stale() {
        let policy = ValidationPolicy::default();
        let created = days_ago(30) - Duration::seconds(1);
        let stale = check_age(&doc("4.0", created), now(), &policy).unwrap();
        assert_eq!(stale.age_days, 31);
    }

    #[test]
    fn future_documents_pass_age_check() {
        let policy = ValidationPolicy::default();
        let created = now() + Duration::days(3);
        assert!(check_age(&doc("4.0", created), now(), &policy).is_none());
    }

    #[test]
    fn custom_policy_changes_both_rules() {
        let policy = ValidationPolicy {
            allowed_formats: vec!["5.0".into()],
            max_age: Duration::days(7),
        };
        assert!(validate(doc("5.0", days_ago(7)), now(), &policy).is_ok());
        assert!(check_format(&doc("4.0", now()), &policy).is_some());
        assert!(check_age(&doc("5.0", days_ago(8)), now(), &policy).is_some());
    }

    #[test]
    fn passing_document_is_returned_unchanged() {
        let original = doc("3.1", days_ago(1));
        let validated = validate(original.clone(), now(), &ValidationPolicy::default()).unwrap();
        assert_eq!(validated, original);
    }
}
