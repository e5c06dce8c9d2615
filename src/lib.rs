// portfolio site driven by a fake shell: `cd about` shows the about page.
// compiles natively (tests, REPL) and to wasm for the browser.
pub mod command;
pub mod commands;
pub mod completion;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod gallery;
pub mod headless;
pub mod history;
pub mod logging;
pub mod navigator;
pub mod net;
pub mod output;
pub mod presenter;
pub mod storage;
pub mod vfs;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use command::{Category, Command, CommandRegistry, CommandResult, Outcome};
pub use completion::TabCompletion;
pub use config::PortfolioConfig;
pub use context::TerminalContext;
pub use dispatcher::{Dispatch, Dispatcher, PendingOutput};
pub use error::ShellError;
pub use headless::HeadlessRenderer;
pub use net::HttpClient;
#[cfg(not(target_arch = "wasm32"))]
pub use net::LocalFileClient;
pub use output::{DeferredOutput, OutputLine, Style};
pub use presenter::{Activation, PageCache, PagePresenter, Renderer};
