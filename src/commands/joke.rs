use super::fetch_json;
use crate::command::{Category, Command, CommandResult};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::output::{DeferredOutput, OutputLine};
use serde::Deserialize;

/// joke
/// Random programming joke. The punchline lands a moment after the setup.
pub struct JokeCommand;

#[derive(Debug, Deserialize)]
struct Joke {
    setup: String,
    punchline: String,
}

impl Command for JokeCommand {
    fn usage(&self) -> &'static str {
        "joke"
    }

    fn summary(&self) -> &'static str {
        "Random programming joke"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let delay = ctx.config.apis.punchline_delay_ms;
        fetch_json(ctx, &ctx.config.apis.joke, "Loading programming joke...", "joke", move |jokes: Vec<Joke>| {
            let joke = jokes
                .into_iter()
                .next()
                .ok_or_else(|| ShellError::Http("empty joke list".to_string()))?;
            Ok(format_joke(joke, delay))
        })
    }
}

fn format_joke(joke: Joke, delay_ms: u32) -> DeferredOutput {
    DeferredOutput::lines(vec![
        OutputLine::blank(),
        OutputLine::success(format!("😄 {}", joke.setup)),
    ])
    .then_after(
        delay_ms,
        vec![OutputLine::info(format!("   {}", joke.punchline)), OutputLine::blank()],
    )
}
