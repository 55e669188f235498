use std::iter::successors;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Weekday};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

/// "June 2024"
pub(crate) static MONTH_TITLE_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [year]");

/// "Jun 2"
pub(crate) static SHORT_DATE_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none]");

/// "June 1, 2024"
pub(crate) static LONG_DATE_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");

pub(crate) trait WeekdayExt {
    /// Column of the weekday in a Sunday-first week
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

pub(crate) fn format_date(date: Date, fmt: &[BorrowedFormatItem<'_>]) -> String {
    date.format(fmt)
        .expect("formatting a date with only date components should not fail")
}

pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

pub(crate) fn last_of_month(date: Date) -> Date {
    iter_month_days(date).last().unwrap_or(date)
}

/// Yields `date` and every following day of the same month
pub(crate) fn iter_month_days(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day().filter(|n| n.month() == d.month()))
}

pub(crate) fn first_of_next_month(date: Date) -> Option<Date> {
    last_of_month(date).next_day()
}

// Steps back to the last day of the previous month, then to that month's
// start, so months of any length are crossed correctly.
pub(crate) fn first_of_previous_month(date: Date) -> Option<Date> {
    first_of_month(date).previous_day().map(first_of_month)
}

/// Returns the Sunday starting the week that contains `date`.  At the start
/// of time the week is truncated, and the earliest representable date is
/// returned instead.
pub(crate) fn week_start(date: Date) -> Date {
    iter_days_before(date)
        .take(usize::from(date.weekday().index0()))
        .last()
        .unwrap_or(date)
}

/// Yields `start` and the following days up to and including Saturday
pub(crate) fn iter_rest_of_week(start: Date) -> impl Iterator<Item = Date> {
    successors(Some(start), |&d| d.next_day())
        .take(usize::from(DAYS_IN_WEEK - start.weekday().index0()))
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
