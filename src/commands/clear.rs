use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;

/// clear
/// Wipe the output log. The working directory and the visible page stay put.
pub struct ClearCommand;

impl Command for ClearCommand {
    fn usage(&self) -> &'static str {
        "clear"
    }

    fn summary(&self) -> &'static str {
        "Clear terminal output"
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn execute(&self, _args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Outcome::ClearScreen)
    }
}
