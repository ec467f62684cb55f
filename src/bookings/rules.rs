use time::macros::format_description;

use crate::models::{BookingStatus, Role};

pub(crate) fn validate_date(date: &str) -> bool {
    time::Date::parse(date, format_description!("[year]-[month]-[day]")).is_ok()
}

/// Zero-padded HH:MM wall-clock time, so string comparison matches time order.
pub(crate) fn validate_time(t: &str) -> bool {
    let b = t.as_bytes();
    b.len() == 5
        && b[2] == b':'
        && b.iter().enumerate().all(|(i, c)| i == 2 || c.is_ascii_digit())
        && &t[..2] < "24"
        && &t[3..] < "60"
}

/// Slots are half-open [start, end); zero-length and inverted slots are invalid.
pub(crate) fn validate_slot(start: &str, end: &str) -> bool {
    validate_time(start) && validate_time(end) && start < end
}

/// Closed transition table. The counterpart tutor confirms or cancels a
/// pending booking and completes a confirmed one; the student can only
/// cancel. Everything else is rejected, including moving back to PENDING.
pub(crate) fn can_transition(role: Role, from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    match role {
        Role::Student => matches!((from, to), (Pending, Cancelled) | (Confirmed, Cancelled)),
        Role::Tutor => matches!(
            (from, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus::*;
    use crate::models::Role;

    #[test]
    fn time_format() {
        assert!(validate_time("00:00"));
        assert!(validate_time("09:30"));
        assert!(validate_time("23:59"));
        assert!(!validate_time("24:00"));
        assert!(!validate_time("09:60"));
        assert!(!validate_time("9:30"));
        assert!(!validate_time("09-30"));
        assert!(!validate_time("+9:30"));
        assert!(!validate_time("09:300"));
    }

    #[test]
    fn slot_must_be_forward_and_nonempty() {
        assert!(validate_slot("09:00", "10:00"));
        assert!(!validate_slot("10:00", "10:00"));
        assert!(!validate_slot("11:00", "10:00"));
        assert!(!validate_slot("late", "10:00"));
    }

    #[test]
    fn date_format() {
        assert!(validate_date("2024-06-01"));
        assert!(!validate_date("2024-13-01"));
        assert!(!validate_date("06/01/2024"));
        assert!(!validate_date("2024-6-1"));
    }

    #[test]
    fn student_transitions() {
        assert!(can_transition(Role::Student, Pending, Cancelled));
        assert!(can_transition(Role::Student, Confirmed, Cancelled));
        assert!(!can_transition(Role::Student, Pending, Confirmed));
        assert!(!can_transition(Role::Student, Confirmed, Completed));
        assert!(!can_transition(Role::Student, Cancelled, Pending));
    }

    #[test]
    fn tutor_transitions() {
        assert!(can_transition(Role::Tutor, Pending, Confirmed));
        assert!(can_transition(Role::Tutor, Pending, Cancelled));
        assert!(can_transition(Role::Tutor, Confirmed, Completed));
        assert!(can_transition(Role::Tutor, Confirmed, Cancelled));
        assert!(!can_transition(Role::Tutor, Confirmed, Pending));
        assert!(!can_transition(Role::Tutor, Completed, Cancelled));
        assert!(!can_transition(Role::Tutor, Cancelled, Confirmed));
        assert!(!can_transition(Role::Tutor, Pending, Completed));
    }
}
