//! Weekday-only date sequences

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The next `count` weekdays strictly after `start`
pub fn weekdays_after(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .skip(1)
        .filter(|d| !is_weekend(*d))
        .take(count)
        .collect()
}

/// Weekdays among the `span` calendar days ending at `end` (inclusive).
///
/// Each date is paired with its calendar offset from the start of the window,
/// so weekend gaps show up as skipped offsets.
pub fn trailing_weekdays(end: NaiveDate, span: usize) -> Vec<(usize, NaiveDate)> {
    let Some(first) = span
        .checked_sub(1)
        .and_then(|back| end.checked_sub_days(Days::new(back as u64)))
    else {
        return Vec::new();
    };

    first
        .iter_days()
        .take(span)
        .enumerate()
        .filter(|(_, d)| !is_weekend(*d))
        .collect()
}
