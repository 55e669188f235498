use gridcal::{
    weekday_abbrev, CellStyler, DayCell, Render, ViewMode, ARROW_STYLE, HEADER_ROW, STATUS_STYLE,
    TITLE_STYLE, WEEK, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};
use std::iter::zip;
use time::Date;

/// Number of columns per day of week; each day takes four plus a gap
const DAY_WIDTH: u16 = 5;

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

const TITLE_LINE: u16 = 0;

/// Line on which grid row 0 (the weekday header) is drawn
const GRID_TOP: u16 = 2;

/// Most day rows a month can need
const MAX_DAY_ROWS: u16 = 6;

const STATUS_LINE: u16 = GRID_TOP + MAX_DAY_ROWS + 2;

/// Number of lines needed to draw the calendar in full
pub(crate) const TOTAL_HEIGHT: u16 = STATUS_LINE + 1;

/// Draws a [`Render`]: the title between navigation arrows, the weekday
/// header, the day cells, and a status line naming the selected date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarWidget<'a, S> {
    render: &'a Render,
    styler: S,
    cursor: Option<Date>,
    selected: Option<Date>,
}

impl<'a, S: CellStyler> CalendarWidget<'a, S> {
    pub(crate) fn new(render: &'a Render, styler: S) -> Self {
        CalendarWidget {
            render,
            styler,
            cursor: None,
            selected: None,
        }
    }

    /// Marks the cell for `date` as focused
    pub(crate) fn cursor(mut self, date: Option<Date>) -> Self {
        self.cursor = date;
        self
    }

    pub(crate) fn selected(mut self, date: Option<Date>) -> Self {
        self.selected = date;
        self
    }

    fn show(&self, cell: &DayCell) -> String {
        if self.cursor == Some(cell.date) {
            format!("[{:2}]", cell.date.day())
        } else {
            format!(" {:2} ", cell.date.day())
        }
    }
}

impl<S: CellStyler> Widget for CalendarWidget<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = MAIN_WIDTH.min(area.width);
        let area = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(self.render.title());
        match self.render.mode() {
            ViewMode::Month | ViewMode::Week => {
                canvas.draw_header();
                for cell in self.render.cells() {
                    canvas.draw_day(cell, self.show(cell), self.styler.cell_style(cell));
                }
            }
            ViewMode::Day => {
                let weekday = self.render.start().weekday().to_string();
                canvas.mvprint_centered(GRID_TOP, &weekday, WEEKDAY_STYLE);
            }
        }
        if let Some(date) = self.selected {
            canvas.mvprint(STATUS_LINE, 0, format!("Selected: {date}"), STATUS_STYLE);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        self.mvprint(TITLE_LINE, 0, "<", ARROW_STYLE);
        self.mvprint(TITLE_LINE, MAIN_WIDTH - 1, ">", ARROW_STYLE);
        self.mvprint_centered(TITLE_LINE, title, TITLE_STYLE);
    }

    fn draw_header(&mut self) {
        for (i, wd) in zip(0u16.., WEEK) {
            self.mvprint(
                GRID_TOP + u16::from(HEADER_ROW),
                DAY_WIDTH * i,
                format!("{:>4}", weekday_abbrev(wd)),
                WEEKDAY_STYLE,
            );
        }
    }

    fn draw_day(&mut self, cell: &DayCell, s: String, style: Style) {
        self.mvprint(
            GRID_TOP + u16::from(cell.row),
            DAY_WIDTH * u16::from(cell.column),
            s,
            style,
        );
    }

    // Centers between the navigation arrows
    fn mvprint_centered(&mut self, y: u16, s: &str, style: Style) {
        let len = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        let x = 1 + (MAIN_WIDTH - 2).saturating_sub(len) / 2;
        self.mvprint(y, x, s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect passed to the Paragraph must lie entirely within the
            // canvas lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

/// Draws `widget` into an off-screen buffer of the calendar's full size and
/// returns its lines as plain text, with trailing whitespace removed
pub(crate) fn plain_lines<W: Widget>(widget: W) -> Vec<String> {
    let area = Rect::new(0, 0, MAIN_WIDTH, TOTAL_HEIGHT);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_lines(&buf)
        .into_iter()
        .map(|line| line.trim_end().to_owned())
        .collect()
}

pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    buf.content()
        .chunks(usize::from(buf.area.width.max(1)))
        .map(|row| row.iter().map(Cell::symbol).collect())
        .collect()
}
