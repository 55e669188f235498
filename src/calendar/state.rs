use super::grid::{DateGridCalculator, Render};
use super::ViewMode;
use crate::theme::Theme;
use log::{debug, info};
use std::fmt;
use thiserror::Error;
use time::Date;

/// The inputs an embedding layer passes to [`CalendarState::update_state`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CalendarProps {
    pub view_mode: ViewMode,
    pub selected: Option<Date>,
    pub theme: Theme,
}

/// State of one calendar widget: the properties it was last given, the
/// reference date of the displayed period, the latest render, and the
/// handlers to notify when the user selects a date.
///
/// Nothing is rendered until the first call to [`update_state`].
///
/// [`update_state`]: CalendarState::update_state
pub struct CalendarState {
    calculator: DateGridCalculator,
    props: CalendarProps,
    start_date: Option<Date>,
    // Invariant: when set, this is the first day of its period under
    // `props.view_mode`
    reference: Option<Date>,
    render: Option<Render>,
    handlers: Vec<Box<dyn FnMut(Date)>>,
}

impl CalendarState {
    pub fn new(today: Date) -> Self {
        CalendarState {
            calculator: DateGridCalculator::new(today),
            props: CalendarProps::default(),
            start_date: None,
            reference: None,
            render: None,
            handlers: Vec::new(),
        }
    }

    /// Sets the date whose period is shown by the first render.  Without
    /// one, the first render shows the selected date's period, or else
    /// today's.
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn today(&self) -> Date {
        self.calculator.today()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.props.view_mode
    }

    pub fn selected(&self) -> Option<Date> {
        self.props.selected
    }

    pub fn theme(&self) -> &Theme {
        &self.props.theme
    }

    pub fn props(&self) -> CalendarProps {
        self.props
    }

    pub fn reference(&self) -> Option<Date> {
        self.reference
    }

    /// The most recent render, or `None` before the first `update_state()`
    pub fn render(&self) -> Option<&Render> {
        self.render.as_ref()
    }

    /// Registers a handler to be called with the new date whenever the user
    /// selects a day cell.  Handlers are called in registration order.
    pub fn on_select<F>(&mut self, handler: F)
    where
        F: FnMut(Date) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Applies new properties and re-renders.
    ///
    /// The first call, and any call that changes the view mode, anchors the
    /// displayed period on the selected date if there is one, otherwise on
    /// today (the start date, if set, takes precedence on the first call).
    /// Other changes keep the displayed period.
    pub fn update_state(&mut self, props: CalendarProps) -> &Render {
        let today = self.today();
        let anchor = match self.reference {
            None => self.start_date.or(props.selected).unwrap_or(today),
            Some(_) if props.view_mode != self.props.view_mode => props.selected.unwrap_or(today),
            Some(reference) => reference,
        };
        self.props = props;
        self.rerender(anchor)
    }

    pub fn next_period(&mut self) -> Result<(), OutOfTimeError> {
        let Some(reference) = self.reference else {
            return Ok(());
        };
        let mode = self.props.view_mode;
        let target = mode.next_period(reference).ok_or(OutOfTimeError)?;
        debug!("moving {mode} view forwards to {target}");
        self.rerender(target);
        Ok(())
    }

    pub fn previous_period(&mut self) -> Result<(), OutOfTimeError> {
        let Some(reference) = self.reference else {
            return Ok(());
        };
        let mode = self.props.view_mode;
        let target = mode.previous_period(reference).ok_or(OutOfTimeError)?;
        debug!("moving {mode} view backwards to {target}");
        self.rerender(target);
        Ok(())
    }

    pub fn go_to_today(&mut self) {
        if self.reference.is_some() {
            self.rerender(self.today());
        }
    }

    /// Selects the day cell displaying `date`, notifies the selection
    /// handlers, and re-renders the current period.
    pub fn select(&mut self, date: Date) -> Result<(), SelectError> {
        if self.render.as_ref().and_then(|r| r.cell(date)).is_none() {
            return Err(SelectError::NotDisplayed(date));
        }
        self.props.selected = Some(date);
        info!("selected {date}");
        for handler in &mut self.handlers {
            handler(date);
        }
        if let Some(reference) = self.reference {
            self.rerender(reference);
        }
        Ok(())
    }

    fn rerender(&mut self, anchor: Date) -> &Render {
        let mode = self.props.view_mode;
        let reference = mode.period_start(anchor);
        self.reference = Some(reference);
        let render = self
            .calculator
            .render(reference, mode, self.props.selected);
        self.render.insert(render)
    }
}

impl fmt::Debug for CalendarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarState")
            .field("calculator", &self.calculator)
            .field("props", &self.props)
            .field("start_date", &self.start_date)
            .field("reference", &self.reference)
            .field("render", &self.render)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum SelectError {
    #[error("{0} is not displayed in the current period")]
    NotDisplayed(Date),
}
