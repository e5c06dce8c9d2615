use crate::command::{run_command, CommandRegistry, Outcome};
use crate::commands::cd::activate_page;
use crate::completion::{self, TabCompletion};
use crate::context::TerminalContext;
use crate::history::Recall;
use crate::error::ShellError;
use crate::output::{DeferredOutput, OutputLine};
use futures::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

/// Output that settles later. Errors are already folded into lines.
pub type PendingOutput = LocalBoxFuture<'static, DeferredOutput>;

/// Everything one submitted line produced.
#[derive(Default)]
pub struct Dispatch {
    pub lines: Vec<OutputLine>,
    /// The log should be wiped before `lines` are appended.
    pub clear_screen: bool,
    pub pending: Option<PendingOutput>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && !self.clear_screen && self.pending.is_none()
    }
}

/// Owns the session and runs submitted lines against the registry.
pub struct Dispatcher {
    ctx: TerminalContext,
    registry: Rc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(ctx: TerminalContext) -> Self {
        Self::with_registry(ctx, CommandRegistry::default_commands())
    }

    pub fn with_registry(mut ctx: TerminalContext, registry: CommandRegistry) -> Self {
        let registry = Rc::new(registry);
        ctx.set_command_registry(Rc::clone(&registry));
        Self { ctx, registry }
    }

    pub fn ctx(&self) -> &TerminalContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut TerminalContext {
        &mut self.ctx
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prompt(&self) -> String {
        self.ctx.prompt()
    }

    /// Show the home page without announcing it.
    pub fn start(&self) -> PendingOutput {
        let home = self.ctx.config.home_page.clone();
        settle(activate_page(&self.ctx.presenter, &home, false))
    }

    /// Run one line of input. Never fails: errors come back as lines.
    pub fn dispatch(&mut self, input: &str) -> Dispatch {
        let input = input.trim();
        if input.is_empty() {
            return Dispatch::default();
        }

        self.ctx.history.record(input);
        let mut dispatch = Dispatch {
            lines: vec![OutputLine::prompt_echo(&self.ctx.prompt(), input)],
            ..Dispatch::default()
        };

        let outcome = run_command(input, &mut self.ctx, &self.registry);
        log::debug!("dispatched `{}`", input);

        match outcome {
            Ok(Outcome::Immediate(lines)) => dispatch.lines.extend(lines),
            Ok(Outcome::ClearScreen) => {
                dispatch.lines.clear();
                dispatch.clear_screen = true;
            }
            Ok(Outcome::Deferred { lines, pending }) => {
                dispatch.lines.extend(lines);
                dispatch.pending = Some(settle(pending));
            }
            Err(err) => {
                log::debug!("`{}` failed: {}", input, err);
                dispatch.lines.push(OutputLine::from(&err));
            }
        }
        dispatch
    }

    /// Arrow-up. `None` leaves the input buffer alone.
    pub fn history_previous(&mut self) -> Option<String> {
        match self.ctx.history.previous() {
            Recall::Entry(line) => Some(line.to_string()),
            Recall::Cleared => Some(String::new()),
            Recall::Unchanged => None,
        }
    }

    /// Arrow-down. Walking past the newest entry yields an empty buffer.
    pub fn history_next(&mut self) -> Option<String> {
        match self.ctx.history.next() {
            Recall::Entry(line) => Some(line.to_string()),
            Recall::Cleared => Some(String::new()),
            Recall::Unchanged => None,
        }
    }

    pub fn complete(&self, input: &str) -> TabCompletion {
        completion::complete(input, &self.ctx.navigator, &self.registry)
    }

    /// First-visit banner: rules as headings, the greeting highlighted.
    pub fn welcome_banner(&self) -> Vec<OutputLine> {
        self.ctx
            .config
            .banner
            .iter()
            .map(|line| {
                if line.starts_with('═') {
                    OutputLine::heading(line.as_str())
                } else if line.contains("Welcome") {
                    OutputLine::success(line.as_str())
                } else {
                    OutputLine::plain(line.as_str())
                }
            })
            .collect()
    }
}

fn settle(pending: LocalBoxFuture<'static, Result<DeferredOutput, ShellError>>) -> PendingOutput {
    pending
        .map(|result| result.unwrap_or_else(|err| DeferredOutput::lines(vec![OutputLine::from(&err)])))
        .boxed_local()
}
