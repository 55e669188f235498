mod grid;
mod state;
mod util;
pub use self::grid::{weekday_abbrev, DateGridCalculator, DayCell, Render, HEADER_ROW, WEEK};
pub use self::state::{CalendarProps, CalendarState, OutOfTimeError, SelectError};
use self::util::{first_of_month, first_of_next_month, first_of_previous_month, week_start};
use std::fmt;
use time::{Date, Duration};

/// The granularity of the displayed period
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    /// Normalizes `date` to the first day of the period containing it: the
    /// 1st of the month, the week's Sunday, or the date itself
    pub fn period_start(self, date: Date) -> Date {
        match self {
            ViewMode::Month => first_of_month(date),
            ViewMode::Week => week_start(date),
            ViewMode::Day => date,
        }
    }

    /// Returns the start of the period after the one containing `date`, or
    /// `None` at the end of time
    pub fn next_period(self, date: Date) -> Option<Date> {
        match self {
            ViewMode::Month => first_of_next_month(date),
            ViewMode::Week => date.checked_add(Duration::WEEK).map(week_start),
            ViewMode::Day => date.next_day(),
        }
    }

    /// Returns the start of the period before the one containing `date`, or
    /// `None` at the start of time
    pub fn previous_period(self, date: Date) -> Option<Date> {
        match self {
            ViewMode::Month => first_of_previous_month(date),
            ViewMode::Week => date.checked_sub(Duration::WEEK).map(week_start),
            ViewMode::Day => date.previous_day(),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Month => write!(f, "month"),
            ViewMode::Week => write!(f, "week"),
            ViewMode::Day => write!(f, "day"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_period_start() {
        let d = date!(2024 - 06 - 13);
        assert_eq!(ViewMode::Month.period_start(d), date!(2024 - 06 - 01));
        assert_eq!(ViewMode::Week.period_start(d), date!(2024 - 06 - 09));
        assert_eq!(ViewMode::Day.period_start(d), d);
    }

    #[test]
    fn test_next_period() {
        assert_eq!(
            ViewMode::Month.next_period(date!(2024 - 01 - 31)),
            Some(date!(2024 - 02 - 01))
        );
        assert_eq!(
            ViewMode::Week.next_period(date!(2024 - 06 - 02)),
            Some(date!(2024 - 06 - 09))
        );
        assert_eq!(
            ViewMode::Day.next_period(date!(2024 - 02 - 28)),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(ViewMode::Month.next_period(Date::MAX), None);
        assert_eq!(ViewMode::Week.next_period(Date::MAX), None);
        assert_eq!(ViewMode::Day.next_period(Date::MAX), None);
    }

    #[test]
    fn test_previous_period() {
        assert_eq!(
            ViewMode::Month.previous_period(date!(2024 - 03 - 01)),
            Some(date!(2024 - 02 - 01))
        );
        assert_eq!(
            ViewMode::Week.previous_period(date!(2024 - 06 - 02)),
            Some(date!(2024 - 05 - 26))
        );
        assert_eq!(
            ViewMode::Day.previous_period(date!(2024 - 03 - 01)),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(ViewMode::Day.previous_period(Date::MIN), None);
        assert_eq!(ViewMode::Month.previous_period(Date::MIN), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ViewMode::Month.to_string(), "month");
        assert_eq!(ViewMode::Week.to_string(), "week");
        assert_eq!(ViewMode::Day.to_string(), "day");
    }
}
