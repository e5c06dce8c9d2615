use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::output::OutputLine;
use chrono::{DateTime, Local, TimeZone};

/// date
/// Current local date and time, e.g. `Mon Jan 06 2025 14:03:11 GMT+0500`.
pub struct DateCommand;

const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

pub(crate) fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DATE_FORMAT).to_string()
}

impl Command for DateCommand {
    fn usage(&self) -> &'static str {
        "date"
    }

    fn summary(&self) -> &'static str {
        "Show current date and time"
    }

    fn category(&self) -> Category {
        Category::Info
    }

    fn execute(&self, _args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Outcome::line(OutputLine::info(format_date(&Local::now()))))
    }
}
