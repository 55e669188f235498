//! Date-grid computations behind a month/week/day calendar widget.
//!
//! [`CalendarState`] holds a widget's properties and selection, and produces
//! a [`Render`] (a title plus [`DayCell`]s laid out on a Sunday-first grid)
//! for the embedding UI to draw.  The grid itself is computed by
//! [`DateGridCalculator`], and [`Theme`] resolves how each cell is colored.
mod calendar;
mod theme;
pub use crate::calendar::{
    weekday_abbrev, CalendarProps, CalendarState, DateGridCalculator, DayCell, OutOfTimeError,
    Render, SelectError, ViewMode, HEADER_ROW, WEEK,
};
pub use crate::theme::{
    CellStyler, Theme, ACCENT, ARROW_STYLE, BASE_STYLE, DAY_TEXT, SELECTED_TEXT, STATUS_STYLE,
    TITLE_STYLE, WEEKDAY_STYLE,
};
