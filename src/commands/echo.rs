use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::output::OutputLine;

/// echo [STRING]...
/// Write the arguments back, separated by single spaces.
pub struct EchoCommand;

impl Command for EchoCommand {
    fn usage(&self) -> &'static str {
        "echo <text>"
    }

    fn summary(&self) -> &'static str {
        "Print text back"
    }

    fn category(&self) -> Category {
        Category::Info
    }

    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Outcome::line(OutputLine::plain(args.join(" "))))
    }
}
