//! Daily streak accrual.
//!
//! A streak counts consecutive calendar days with at least one completed
//! pomodoro. Days are compared as plain dates; the caller decides what
//! "today" is (the server uses its local clock truncated to midnight).

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub current: i32,
    pub longest: i32,
    pub last_completed: Option<NaiveDate>,
}

/// Date-gated accrual. Returns `None` when a completion was already counted
/// today, otherwise the advanced counters.
pub fn accrue(prev: Counters, today: NaiveDate) -> Option<Counters> {
    if prev.last_completed == Some(today) {
        return None;
    }
    Some(increment(prev, today))
}

/// Unconditional increment used by the force path. A completion already
/// recorded today counts as continuing the streak, so calling this after
/// [`accrue`] on the same day adds a second step.
pub fn increment(prev: Counters, today: NaiveDate) -> Counters {
    let continuing = match prev.last_completed {
        Some(last) => last == today || Some(last) == today.pred_opt(),
        None => false,
    };
    let base = if continuing { prev.current } else { 0 };
    let current = base.saturating_add(1);

    Counters {
        current,
        longest: prev.longest.max(current),
        last_completed: Some(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn counters(current: i32, longest: i32, last: Option<NaiveDate>) -> Counters {
        Counters { current, longest, last_completed: last }
    }

    #[test]
    fn first_completion_starts_at_one() {
        let next = accrue(Counters::default(), day(2025, 3, 1)).unwrap();
        assert_eq!(next, counters(1, 1, Some(day(2025, 3, 1))));
    }

    #[test]
    fn same_day_is_idempotent() {
        let today = day(2025, 3, 1);
        let first = accrue(Counters::default(), today).unwrap();
        assert_eq!(accrue(first, today), None);
    }

    #[test]
    fn yesterday_continues() {
        let today = day(2025, 3, 2);
        let prev = counters(4, 7, Some(day(2025, 3, 1)));
        let next = accrue(prev, today).unwrap();
        assert_eq!(next.current, 5);
        assert_eq!(next.longest, 7);
        assert_eq!(next.last_completed, Some(today));
    }

    #[test]
    fn continuity_across_month_and_year_boundaries() {
        let next = accrue(counters(2, 2, Some(day(2024, 2, 29))), day(2024, 3, 1)).unwrap();
        assert_eq!(next.current, 3);

        let next = accrue(counters(9, 9, Some(day(2024, 12, 31))), day(2025, 1, 1)).unwrap();
        assert_eq!(next.current, 10);
        assert_eq!(next.longest, 10);
    }

    #[test]
    fn gap_resets_to_one() {
        for prior in [0, 1, 5, 300] {
            let prev = counters(prior, 300, Some(day(2025, 3, 1)));
            let next = accrue(prev, day(2025, 3, 3)).unwrap();
            assert_eq!(next.current, 1, "prior streak {prior}");
            assert_eq!(next.longest, 300);
        }
    }

    #[test]
    fn last_date_in_future_is_a_break() {
        let prev = counters(3, 3, Some(day(2025, 3, 10)));
        let next = accrue(prev, day(2025, 3, 5)).unwrap();
        assert_eq!(next.current, 1);
    }

    #[test]
    fn longest_follows_current() {
        let next = accrue(counters(3, 3, Some(day(2025, 3, 1))), day(2025, 3, 2)).unwrap();
        assert_eq!(next.longest, 4);
    }

    #[test]
    fn longest_never_decreases_over_a_sequence() {
        // completion days with gaps, repeats and runs
        let days = [
            day(2025, 1, 1),
            day(2025, 1, 2),
            day(2025, 1, 2),
            day(2025, 1, 3),
            day(2025, 1, 7),
            day(2025, 1, 8),
            day(2025, 1, 20),
            day(2025, 1, 21),
            day(2025, 1, 22),
            day(2025, 1, 23),
        ];

        let mut state = Counters::default();
        for today in days {
            let before = state;
            if let Some(next) = accrue(state, today) {
                state = next;
            }
            assert!(state.longest >= before.longest);
            assert!(state.longest >= state.current);
        }
        assert_eq!(state.current, 4);
        assert_eq!(state.longest, 4);
    }

    #[test]
    fn force_increment_double_counts_same_day() {
        let today = day(2025, 3, 1);
        let once = accrue(Counters::default(), today).unwrap();
        let forced = increment(once, today);
        assert_eq!(forced.current, 2);
        assert_eq!(forced.longest, 2);
    }

    #[test]
    fn force_increment_resets_after_gap() {
        let forced = increment(counters(6, 6, Some(day(2025, 3, 1))), day(2025, 3, 9));
        assert_eq!(forced.current, 1);
        assert_eq!(forced.longest, 6);
    }
}
