mod app;
mod help;
mod widget;
use crate::app::App;
use crate::widget::{plain_lines, CalendarWidget};
use anyhow::Context;
use gridcal::{CalendarProps, CalendarState, Theme, ViewMode};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{style::Color, DefaultTerminal};
use std::cell::Cell;
use std::ffi::OsString;
use std::rc::Rc;
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

static MDY_FMT: &[BorrowedFormatItem<'_>] = format_description!("[month]/[day]/[year]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    view_mode: ViewMode,
    selected: Option<Date>,
    theme: Theme,
    print: bool,
}

impl Options {
    fn props(&self) -> CalendarProps {
        CalendarProps {
            view_mode: self.view_mode,
            selected: self.selected,
            theme: self.theme,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("month") => opts.view_mode = ViewMode::Month,
                Arg::Short('w') | Arg::Long("week") => opts.view_mode = ViewMode::Week,
                Arg::Short('d') | Arg::Long("day") => opts.view_mode = ViewMode::Day,
                Arg::Short('p') | Arg::Long("print") => opts.print = true,
                Arg::Short('s') | Arg::Long("select") => {
                    opts.selected = Some(parse_date(parser.value()?)?);
                }
                Arg::Long("today-color") => {
                    opts.theme.today_fg = Some(parse_color(parser.value()?)?);
                }
                Arg::Long("selected-bg") => {
                    opts.theme.selected_bg = Some(parse_color(parser.value()?)?);
                }
                Arg::Long("selected-fg") => {
                    opts.theme.selected_fg = Some(parse_color(parser.value()?)?);
                }
                Arg::Value(value) if opts.date.is_none() => opts.date = Some(parse_date(value)?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut calendar = CalendarState::new(today);
                if let Some(date) = opts.date {
                    calendar = calendar.start_date(date);
                }
                if opts.print {
                    let render = calendar.update_state(opts.props());
                    let widget = CalendarWidget::new(render, opts.theme).selected(opts.selected);
                    for line in plain_lines(widget) {
                        println!("{line}");
                    }
                    return Ok(());
                }
                let chosen = Rc::new(Cell::new(None));
                let sink = Rc::clone(&chosen);
                calendar.on_select(move |date| sink.set(Some(date)));
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(calendar, opts.props())
                        .run(&mut terminal)
                        .context("failed to run calendar")?;
                    Ok(())
                })?;
                if let Some(date) = chosen.get() {
                    println!("{}", date.format(MDY_FMT)?);
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: gridcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Month/week/day terminal calendar with date selection");
                println!();
                println!("Options:");
                println!("  -m, --month               Show a month at a time (default)");
                println!("  -w, --week                Show a week at a time");
                println!("  -d, --day                 Show a day at a time");
                println!("  -s, --select YYYY-MM-DD   Start with the given date selected");
                println!("      --today-color COLOR   Text color for today");
                println!("      --selected-bg COLOR   Background color for the selected date");
                println!("      --selected-fg COLOR   Text color for the selected date");
                println!("  -p, --print               Print the period and exit");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                println!();
                println!("COLOR may be a name such as \"green\" or an RGB value such as \"#0077d7\".");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized color {0:?}")]
struct InvalidColorError(String);

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    match Date::parse(&value, YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

fn parse_color(value: OsString) -> Result<Color, lexopt::Error> {
    let value = value.string()?;
    match value.parse::<Color>() {
        Ok(c) => Ok(c),
        Err(_) => Err(lexopt::Error::ParsingFailed {
            error: Box::new(InvalidColorError(value.clone())),
            value,
        }),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
