use crate::calendar::DayCell;
use ratatui::style::{Color, Modifier, Style};

/// Default text color for today and background for the selected date
pub const ACCENT: Color = Color::Rgb(0x00, 0x77, 0xd7);

/// Default text color for the selected date
pub const SELECTED_TEXT: Color = Color::White;

/// Text color for ordinary days
pub const DAY_TEXT: Color = Color::Rgb(0x64, 0x64, 0x64);

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const ARROW_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(ACCENT)
    .add_modifier(Modifier::BOLD);

pub const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Decides how a day cell is drawn
pub trait CellStyler {
    fn cell_style(&self, cell: &DayCell) -> Style;
}

impl<T: CellStyler + ?Sized> CellStyler for &T {
    fn cell_style(&self, cell: &DayCell) -> Style {
        (**self).cell_style(cell)
    }
}

/// Optional color overrides; unset colors fall back to [`ACCENT`],
/// [`SELECTED_TEXT`], and [`DAY_TEXT`]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Theme {
    pub selected_bg: Option<Color>,
    pub selected_fg: Option<Color>,
    pub today_fg: Option<Color>,
}

impl Theme {
    pub fn selected_background(&self) -> Color {
        self.selected_bg.unwrap_or(ACCENT)
    }

    pub fn selected_text(&self) -> Color {
        self.selected_fg.unwrap_or(SELECTED_TEXT)
    }

    pub fn today_text(&self) -> Color {
        self.today_fg.unwrap_or(ACCENT)
    }
}

impl CellStyler for Theme {
    // Selection wins over today
    fn cell_style(&self, cell: &DayCell) -> Style {
        let style = BASE_STYLE.fg(DAY_TEXT).add_modifier(Modifier::BOLD);
        if cell.is_selected {
            style.fg(self.selected_text()).bg(self.selected_background())
        } else if cell.is_today {
            style.fg(self.today_text())
        } else {
            style
        }
    }
}
