use crate::command::{Category, Command, CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::output::{DeferredOutput, OutputLine};
use crate::presenter::{page_label, Activation, PagePresenter};
use futures::future::{FutureExt, LocalBoxFuture};

/// cd <page> | cd .. | cd ~
/// Move through the site map; every move shows the page bound to the new
/// location.
pub struct CdCommand;

const CD_USAGE: &str = "cd <page>";

impl Command for CdCommand {
    fn usage(&self) -> &'static str {
        CD_USAGE
    }

    fn summary(&self) -> &'static str {
        "Navigate to a page (cd .. goes back, cd ~ goes home)"
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let target = args.first().ok_or_else(|| ShellError::MissingArgument {
            command: "cd".to_string(),
            usage: "cd <directory> or cd ..".to_string(),
        })?;

        let moved = ctx.navigator.change_directory(target)?;
        match moved.page {
            Some(page) => Ok(Outcome::Deferred {
                lines: Vec::new(),
                pending: activate_page(&ctx.presenter, &page, true),
            }),
            None => Ok(Outcome::empty()),
        }
    }
}

/// Activate `page` and describe the result. With `announce` a successful
/// switch prints `→ Loaded: <name>`.
pub(crate) fn activate_page(
    presenter: &PagePresenter,
    page: &str,
    announce: bool,
) -> LocalBoxFuture<'static, Result<DeferredOutput, ShellError>> {
    presenter
        .activate(page)
        .map(move |activation| -> Result<DeferredOutput, ShellError> {
            let lines = match activation? {
                Activation::Shown(page) if announce => {
                    vec![OutputLine::success(format!("→ Loaded: {}", page_label(&page)))]
                }
                _ => Vec::new(),
            };
            Ok(DeferredOutput::lines(lines))
        })
        .boxed_local()
}
