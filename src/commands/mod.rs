pub mod cd;
pub mod clear;
pub mod crypto;
pub mod date;
pub mod echo;
pub mod fact;
pub mod github;
pub mod help;
pub mod joke;
pub mod ls;
pub mod pwd;
pub mod weather;
pub mod whoami;

use crate::command::{CommandResult, Outcome};
use crate::context::TerminalContext;
use crate::error::ShellError;
use crate::output::{DeferredOutput, OutputLine};
use futures::future::FutureExt;
use serde::de::DeserializeOwned;

/// Shared shape of the API commands: print `loading`, GET `url`, decode the
/// JSON into `T` and format it. Any failure along the way becomes
/// "Failed to fetch `what`".
pub(crate) fn fetch_json<T, F>(
    ctx: &TerminalContext,
    url: &str,
    loading: &str,
    what: &'static str,
    format: F,
) -> CommandResult
where
    T: DeserializeOwned + 'static,
    F: FnOnce(T) -> Result<DeferredOutput, ShellError> + 'static,
{
    let request = ctx.http.get_json(url);
    let pending = request
        .map(move |body| {
            body.and_then(|value| serde_json::from_value::<T>(value).map_err(|e| ShellError::Http(e.to_string())))
                .and_then(format)
                .map_err(|e| {
                    log::warn!("{} request failed: {}", what, e);
                    ShellError::NetworkFetchFailure(what.to_string())
                })
        })
        .boxed_local();

    Ok(Outcome::Deferred {
        lines: vec![OutputLine::info(loading)],
        pending,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::PortfolioConfig;
    use crate::context::TerminalContext;
    use crate::error::ShellError;
    use crate::headless::HeadlessRenderer;
    use crate::net::HttpClient;
    use futures::future::{self, FutureExt, LocalBoxFuture};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Canned responses keyed by url; anything else fails.
    #[derive(Default)]
    pub struct CannedHttp {
        pub responses: HashMap<String, String>,
    }

    impl HttpClient for CannedHttp {
        fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ShellError>> {
            let result = self
                .responses
                .get(url)
                .cloned()
                .ok_or_else(|| ShellError::Http(format!("no canned response for {}", url)));
            future::ready(result).boxed_local()
        }
    }

    /// Every configured page served as a bare `<section>`.
    pub fn canned_pages(config: &PortfolioConfig) -> CannedHttp {
        let mut http = CannedHttp::default();
        for (page, url) in &config.pages {
            http.responses
                .insert(url.clone(), format!(r#"<section id="{}" class="page"></section>"#, page));
        }
        http
    }

    pub fn context_with(responses: &[(&str, &str)]) -> TerminalContext {
        let config = PortfolioConfig::builtin().unwrap();
        let mut http = canned_pages(&config);
        for (url, body) in responses {
            http.responses.insert(url.to_string(), body.to_string());
        }
        let renderer = Rc::new(RefCell::new(HeadlessRenderer::new()));
        TerminalContext::new(Rc::new(config), renderer, Rc::new(http)).unwrap()
    }

    pub fn context() -> TerminalContext {
        context_with(&[])
    }

    /// Like [`context`], but fetching `url` fails.
    pub fn context_without(url: &str) -> TerminalContext {
        let config = PortfolioConfig::builtin().unwrap();
        let mut http = canned_pages(&config);
        http.responses.remove(url);
        let renderer = Rc::new(RefCell::new(HeadlessRenderer::new()));
        TerminalContext::new(Rc::new(config), renderer, Rc::new(http)).unwrap()
    }
}
