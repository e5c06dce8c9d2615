use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::output::OutputLine;

/// pwd
/// Print the working directory, e.g. `~/projects/project1`.
pub struct PwdCommand;

impl Command for PwdCommand {
    fn usage(&self) -> &'static str {
        "pwd"
    }

    fn summary(&self) -> &'static str {
        "Show current location"
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        Ok(Outcome::line(OutputLine::info(ctx.navigator.path().to_string())))
    }
}
