use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::output::OutputLine;

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn usage(&self) -> &'static str {
        "whoami"
    }

    fn summary(&self) -> &'static str {
        "Who is behind this terminal"
    }

    fn category(&self) -> Category {
        Category::Info
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        Ok(Outcome::line(OutputLine::info(ctx.config.whoami.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;

    #[test]
    fn test_whoami_uses_configured_identity() {
        let mut ctx = context();
        match WhoamiCommand.execute(&[], &mut ctx).unwrap() {
            Outcome::Immediate(lines) => {
                assert_eq!(lines, vec![OutputLine::info("saad - Web Developer & Terminal Enthusiast")])
            }
            _ => panic!("whoami is immediate"),
        }
    }
}
