use super::util::{
    first_of_month, format_date, iter_month_days, iter_rest_of_week, week_start, WeekdayExt,
    DAYS_IN_WEEK, LONG_DATE_FMT, MONTH_TITLE_FMT, SHORT_DATE_FMT,
};
use super::ViewMode;
use log::debug;
use std::iter::zip;
use time::{Date, Weekday, Weekday::*};

/// The days of the week in grid column order
pub const WEEK: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

/// Grid row holding the weekday headers; day cells start on the row below
pub const HEADER_ROW: u8 = 0;

/// Three-letter name of a weekday, as used in the grid's header row
pub fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Sunday => "Sun",
        Monday => "Mon",
        Tuesday => "Tue",
        Wednesday => "Wed",
        Thursday => "Thu",
        Friday => "Fri",
        Saturday => "Sat",
    }
}

/// One visible calendar day
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    pub date: Date,
    pub row: u8,
    /// 0 for Sunday through 6 for Saturday
    pub column: u8,
    pub is_today: bool,
    pub is_selected: bool,
}

/// The output of one render pass: a title and the day cells to lay out.
/// Day-mode renders have no cells.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Render {
    mode: ViewMode,
    start: Date,
    title: String,
    cells: Vec<DayCell>,
}

impl Render {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// First day of the displayed period
    pub fn start(&self) -> Date {
        self.start
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Returns the cell displaying `date`, if any
    pub fn cell(&self, date: Date) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    pub fn selected_cell(&self) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.is_selected)
    }

    pub fn today_cell(&self) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.is_today)
    }

    /// Number of grid rows used by day cells (not counting the header row)
    pub fn day_rows(&self) -> u8 {
        self.cells.iter().map(|c| c.row).max().unwrap_or(HEADER_ROW)
    }
}

/// Maps a reference date and view mode to the cells of the period
/// containing it.  `today` is fixed at construction so that results do not
/// depend on the clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateGridCalculator {
    today: Date,
}

impl DateGridCalculator {
    pub fn new(today: Date) -> Self {
        DateGridCalculator { today }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn render(&self, reference: Date, mode: ViewMode, selected: Option<Date>) -> Render {
        let render = match mode {
            ViewMode::Month => self.month(reference, selected),
            ViewMode::Week => self.week(reference, selected),
            ViewMode::Day => self.day(reference),
        };
        debug!(
            "rendered {mode} view for {reference}: {:?} with {} cells",
            render.title,
            render.cells.len()
        );
        render
    }

    /// Lays out every day of the month containing `reference`, starting at
    /// row 1 in the column of the 1st's weekday and wrapping after Saturday
    pub fn month(&self, reference: Date, selected: Option<Date>) -> Render {
        let first = first_of_month(reference);
        let start = first.weekday().index0();
        let cells = zip(0u8.., iter_month_days(first))
            .map(|(i, date)| {
                let slot = start + i;
                self.cell(
                    date,
                    slot / DAYS_IN_WEEK + 1,
                    slot % DAYS_IN_WEEK,
                    selected,
                )
            })
            .collect();
        Render {
            mode: ViewMode::Month,
            start: first,
            title: format_date(first, MONTH_TITLE_FMT),
            cells,
        }
    }

    /// Lays out the Sunday-to-Saturday week containing `reference` in row 1
    pub fn week(&self, reference: Date, selected: Option<Date>) -> Render {
        let start = week_start(reference);
        let cells = iter_rest_of_week(start)
            .map(|date| self.cell(date, 1, date.weekday().index0(), selected))
            .collect::<Vec<_>>();
        let end = cells.last().map_or(start, |c| c.date);
        Render {
            mode: ViewMode::Week,
            start,
            title: format!(
                "{} – {}",
                format_date(start, SHORT_DATE_FMT),
                format_date(end, SHORT_DATE_FMT)
            ),
            cells,
        }
    }

    pub fn day(&self, reference: Date) -> Render {
        Render {
            mode: ViewMode::Day,
            start: reference,
            title: format_date(reference, LONG_DATE_FMT),
            cells: Vec::new(),
        }
    }

    fn cell(&self, date: Date, row: u8, column: u8, selected: Option<Date>) -> DayCell {
        DayCell {
            date,
            row,
            column,
            is_today: date == self.today,
            is_selected: selected == Some(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::{macros::date, Month};

    fn days_in_month(year: i32, month: Month) -> usize {
        match month {
            Month::February if time::util::is_leap_year(year) => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    fn calc() -> DateGridCalculator {
        DateGridCalculator::new(date!(2024 - 06 - 12))
    }

    #[test]
    fn test_june_2024() {
        let render = calc().month(date!(2024 - 06 - 01), None);
        assert_eq!(render.mode(), ViewMode::Month);
        assert_eq!(render.title(), "June 2024");
        assert_eq!(render.start(), date!(2024 - 06 - 01));
        assert_eq!(render.cells().len(), 30);
        let first = render.cells()[0];
        assert_eq!(first.date, date!(2024 - 06 - 01));
        assert_eq!((first.row, first.column), (1, 6));
        let second = render.cells()[1];
        assert_eq!((second.row, second.column), (2, 0));
        let last = render.cells()[29];
        assert_eq!(last.date, date!(2024 - 06 - 30));
        assert_eq!((last.row, last.column), (6, 0));
        assert_eq!(render.day_rows(), 6);
    }

    #[test]
    fn test_month_from_mid_month_reference() {
        let calc = calc();
        assert_eq!(
            calc.month(date!(2024 - 06 - 17), None),
            calc.month(date!(2024 - 06 - 01), None)
        );
    }

    #[test]
    fn test_february_starting_on_sunday() {
        let render = calc().month(date!(2015 - 02 - 01), None);
        assert_eq!(render.title(), "February 2015");
        assert_eq!(render.cells().len(), 28);
        assert_eq!(render.day_rows(), 4);
        assert_eq!(render.cells()[0].column, 0);
        assert_eq!(render.cells()[27].column, 6);
    }

    #[test]
    fn test_every_month_has_one_cell_per_day() {
        let calc = calc();
        for year in 1999..=2025 {
            let mut month = Month::January;
            for _ in 0..12 {
                let first = Date::from_calendar_date(year, month, 1)
                    .expect("first of month should be a valid date");
                let render = calc.month(first, None);
                let dates = render.cells().iter().map(|c| c.date).collect::<HashSet<_>>();
                assert_eq!(dates.len(), render.cells().len(), "duplicate dates");
                assert_eq!(
                    render.cells().len(),
                    days_in_month(year, month),
                    "wrong number of cells for {year}-{month}"
                );
                assert!(dates.iter().all(|d| d.month() == month && d.year() == year));
                assert_eq!(render.cells()[0].column, first.weekday().index0());
                for cell in render.cells() {
                    assert_eq!(cell.column, cell.date.weekday().index0());
                    assert!((1..=6).contains(&cell.row), "row out of range");
                }
                month = month.next();
            }
        }
    }

    #[test]
    fn test_week_from_sunday() {
        let render = calc().week(date!(2024 - 06 - 02), None);
        assert_eq!(render.mode(), ViewMode::Week);
        assert_eq!(render.title(), "Jun 2 – Jun 8");
        assert_eq!(render.cells().len(), 7);
        for (cell, (column, day)) in zip(render.cells(), zip(0u8.., 2u8..)) {
            assert_eq!(cell.column, column);
            assert_eq!(cell.row, 1);
            assert_eq!(cell.date.day(), day);
        }
    }

    #[test]
    fn test_week_from_any_weekday() {
        let calc = calc();
        let expected = calc.week(date!(2024 - 06 - 02), None);
        for day in 2..=8 {
            let reference = Date::from_calendar_date(2024, Month::June, day)
                .expect("June date should be valid");
            assert_eq!(calc.week(reference, None), expected);
        }
    }

    #[test]
    fn test_week_across_year() {
        let render = calc().week(date!(2024 - 12 - 31), None);
        assert_eq!(render.title(), "Dec 29 – Jan 4");
        assert_eq!(render.start(), date!(2024 - 12 - 29));
        let dates = render.cells().iter().map(|c| c.date).collect::<Vec<_>>();
        assert_eq!(dates.first(), Some(&date!(2024 - 12 - 29)));
        assert_eq!(dates.last(), Some(&date!(2025 - 01 - 04)));
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn test_week_at_end_of_time() {
        let render = calc().week(Date::MAX, None);
        let last = render.cells().last().expect("week should not be empty");
        assert_eq!(last.date, Date::MAX);
        assert!(render.cells().len() <= 7);
        assert_eq!(render.cells()[0].date.weekday(), Sunday);
    }

    #[test]
    fn test_day() {
        let render = calc().day(date!(2024 - 06 - 01));
        assert_eq!(render.mode(), ViewMode::Day);
        assert_eq!(render.title(), "June 1, 2024");
        assert_eq!(render.start(), date!(2024 - 06 - 01));
        assert!(render.cells().is_empty());
        assert_eq!(render.day_rows(), HEADER_ROW);
    }

    #[test]
    fn test_today_flag() {
        let render = calc().month(date!(2024 - 06 - 01), None);
        let today = render.today_cell().expect("today should be displayed");
        assert_eq!(today.date, date!(2024 - 06 - 12));
        assert_eq!(render.cells().iter().filter(|c| c.is_today).count(), 1);
        let render = calc().month(date!(2024 - 07 - 01), None);
        assert_eq!(render.today_cell(), None);
    }

    #[test]
    fn test_selected_flag_requires_exact_date() {
        let calc = calc();
        let render = calc.month(date!(2024 - 06 - 01), Some(date!(2024 - 06 - 15)));
        let selected = render.selected_cell().expect("selection should be displayed");
        assert_eq!(selected.date, date!(2024 - 06 - 15));
        assert_eq!(render.cells().iter().filter(|c| c.is_selected).count(), 1);

        // Same day of month, different month or year
        let render = calc.month(date!(2024 - 06 - 01), Some(date!(2024 - 07 - 15)));
        assert_eq!(render.selected_cell(), None);
        let render = calc.month(date!(2024 - 06 - 01), Some(date!(2023 - 06 - 15)));
        assert_eq!(render.selected_cell(), None);
        let render = calc.week(date!(2024 - 06 - 02), Some(date!(2024 - 07 - 05)));
        assert_eq!(render.selected_cell(), None);

        let render = calc.month(date!(2024 - 06 - 01), None);
        assert_eq!(render.selected_cell(), None);
    }

    #[test]
    fn test_render_dispatch() {
        let calc = calc();
        let reference = date!(2024 - 06 - 05);
        assert_eq!(
            calc.render(reference, ViewMode::Month, None),
            calc.month(reference, None)
        );
        assert_eq!(
            calc.render(reference, ViewMode::Week, None),
            calc.week(reference, None)
        );
        assert_eq!(calc.render(reference, ViewMode::Day, None), calc.day(reference));
    }

    #[test]
    fn test_weekday_abbrev() {
        let names = WEEK.map(weekday_abbrev);
        assert_eq!(names, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    }
}
