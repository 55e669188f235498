use crate::help::Help;
use crate::widget::CalendarWidget;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gridcal::{CalendarProps, CalendarState, ViewMode, BASE_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal};
use std::io::{self, Write};
use time::{Date, Duration};

#[derive(Debug)]
pub(crate) struct App {
    calendar: CalendarState,
    // Date of the focused cell; always one of the displayed cells
    cursor: Option<Date>,
    state: AppState,
}

impl App {
    pub(crate) fn new(mut calendar: CalendarState, props: CalendarProps) -> App {
        calendar.update_state(props);
        let mut app = App {
            calendar,
            cursor: None,
            state: AppState::Calendar,
        };
        app.reset_cursor();
        app
    }

    pub(crate) fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Enter | KeyCode::Char(' ') => self.select(),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.next_period(),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.previous_period(),
                KeyCode::Char('m') => self.set_view_mode(ViewMode::Month),
                KeyCode::Char('w') => self.set_view_mode(ViewMode::Week),
                KeyCode::Char('d') => self.set_view_mode(ViewMode::Day),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.calendar.go_to_today();
                    self.reset_cursor();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    // The cursor only moves between displayed cells; it never scrolls the
    // calendar to another period.
    fn move_cursor(&mut self, days: i64) -> bool {
        let target = self
            .cursor
            .and_then(|d| d.checked_add(Duration::days(days)))
            .filter(|&d| {
                self.calendar
                    .render()
                    .is_some_and(|r| r.cell(d).is_some())
            });
        if target.is_some() {
            self.cursor = target;
        }
        target.is_some()
    }

    fn select(&mut self) -> bool {
        self.cursor
            .is_some_and(|date| self.calendar.select(date).is_ok())
    }

    fn next_period(&mut self) -> bool {
        let r = self.calendar.next_period().is_ok();
        self.reset_cursor();
        r
    }

    fn previous_period(&mut self) -> bool {
        let r = self.calendar.previous_period().is_ok();
        self.reset_cursor();
        r
    }

    fn set_view_mode(&mut self, view_mode: ViewMode) -> bool {
        let props = CalendarProps {
            view_mode,
            ..self.calendar.props()
        };
        self.calendar.update_state(props);
        self.reset_cursor();
        true
    }

    // Focus the selected cell, else today's, else the first
    fn reset_cursor(&mut self) {
        self.cursor = self
            .calendar
            .render()
            .and_then(|r| {
                r.selected_cell()
                    .or_else(|| r.today_cell())
                    .or_else(|| r.cells().first())
            })
            .map(|c| c.date);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        if let Some(render) = self.calendar.render() {
            CalendarWidget::new(render, self.calendar.theme())
                .cursor(self.cursor)
                .selected(self.calendar.selected())
                .render(area, buf);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
