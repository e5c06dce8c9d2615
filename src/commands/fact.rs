use super::fetch_json;
use crate::command::{Category, Command, CommandResult};
use crate::context::TerminalContext;
use crate::output::{DeferredOutput, OutputLine};
use serde::Deserialize;

pub struct FactCommand;

#[derive(Debug, Deserialize)]
struct Fact {
    text: String,
}

impl Command for FactCommand {
    fn usage(&self) -> &'static str {
        "fact"
    }

    fn summary(&self) -> &'static str {
        "Random interesting fact"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        fetch_json(ctx, &ctx.config.apis.fact, "Loading random fact...", "fact", |fact: Fact| {
            Ok(DeferredOutput::lines(vec![
                OutputLine::blank(),
                OutputLine::success(format!("💡 {}", fact.text)),
                OutputLine::blank(),
            ]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Outcome;
    use crate::commands::testing::{context, context_with};
    use crate::error::ShellError;
    use futures::executor::block_on;

    const URL: &str = "https://uselessfacts.jsph.pl/random.json?language=en";

    fn settle(outcome: Outcome) -> Result<DeferredOutput, ShellError> {
        match outcome {
            Outcome::Deferred { pending, .. } => block_on(pending),
            _ => panic!("fact is deferred"),
        }
    }

    #[test]
    fn test_fact() {
        let mut ctx = context_with(&[(URL, r#"{"id":"x","text":"Honey never spoils.","source":"s"}"#)]);
        let out = settle(FactCommand.execute(&[], &mut ctx).unwrap()).unwrap();
        assert_eq!(out.lines[1], OutputLine::success("💡 Honey never spoils."));
        assert!(out.delayed.is_none());
    }

    #[test]
    fn test_fact_network_failure() {
        let mut ctx = context();
        let err = settle(FactCommand.execute(&[], &mut ctx).unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch fact");
    }
}
