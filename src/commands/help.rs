use crate::command::{Category, Command, CommandRegistry, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::output::OutputLine;

/// help [COMMAND]
/// Grouped command listing, or the usage line of one command.
pub struct HelpCommand;

const CATEGORIES: [Category; 3] = [Category::Navigation, Category::Info, Category::Network];

impl Command for HelpCommand {
    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn summary(&self) -> &'static str {
        "Show this help"
    }

    fn category(&self) -> Category {
        Category::Info
    }

    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let fallback;
        let registry = match ctx.get_command_registry() {
            Some(registry) => &**registry,
            None => {
                fallback = CommandRegistry::default_commands();
                &fallback
            }
        };

        if let Some(name) = args.first() {
            let command = registry
                .get(name)
                .ok_or_else(|| ShellError::UnknownCommand(name.to_lowercase()))?;
            return Ok(Outcome::Immediate(vec![
                OutputLine::info(format!("Usage: {}", command.usage())),
                OutputLine::plain(format!("  {}", command.summary())),
            ]));
        }

        Ok(Outcome::Immediate(listing(registry)))
    }
}

fn listing(registry: &CommandRegistry) -> Vec<OutputLine> {
    let mut lines = vec![OutputLine::info("Available commands:"), OutputLine::blank()];

    for category in CATEGORIES {
        let entries: Vec<OutputLine> = registry
            .get_command_names()
            .iter()
            .filter_map(|name| registry.get(name))
            .filter(|cmd| cmd.category() == category)
            .map(|cmd| OutputLine::plain(format!("  {:<14} - {}", cmd.usage(), cmd.summary())))
            .collect();
        if entries.is_empty() {
            continue;
        }
        lines.push(OutputLine::heading(category.title()));
        lines.extend(entries);
        lines.push(OutputLine::blank());
    }

    lines.push(OutputLine::info("Try: ls to see available sections"));
    lines
}
