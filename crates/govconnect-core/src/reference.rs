//! Complaint reference codes.

use chrono::{DateTime, Utc};

/// Reference code for a submission: `CMP` plus the last eight digits of the
/// Unix-epoch milliseconds. Timestamp-derived, so it is human-quotable but
/// explicitly not unique across processes.
pub fn reference_number(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("CMP{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reference_uses_last_eight_millis_digits() {
        let at = Utc.timestamp_millis_opt(1_734_567_890_123).unwrap();
        assert_eq!(reference_number(at), "CMP67890123");
    }

    #[test]
    fn short_timestamps_do_not_panic() {
        let at = Utc.timestamp_millis_opt(42).unwrap();
        assert_eq!(reference_number(at), "CMP42");
    }

    #[test]
    fn reference_has_cmp_prefix_and_digits() {
        let code = reference_number(Utc::now());
        assert!(code.starts_with("CMP"));
        assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
