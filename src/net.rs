use crate::error::ShellError;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

/// Outbound GET requests. Page fragments and the API commands both go
/// through this.
pub trait HttpClient {
    fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ShellError>>;

    fn get_json(&self, url: &str) -> LocalBoxFuture<'static, Result<Value, ShellError>> {
        self.get_text(url)
            .map(|body| {
                body.and_then(|text| {
                    serde_json::from_str(&text).map_err(|e| ShellError::Http(format!("invalid json: {}", e)))
                })
            })
            .boxed_local()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::FetchClient;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::HttpClient;
    use crate::error::ShellError;
    use futures::future::{FutureExt, LocalBoxFuture};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    /// `window.fetch` backed client.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FetchClient;

    impl HttpClient for FetchClient {
        fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ShellError>> {
            let url = url.to_string();
            async move { fetch_text(&url).await }.boxed_local()
        }
    }

    fn js_error(value: JsValue) -> ShellError {
        ShellError::Http(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }

    async fn fetch_text(url: &str) -> Result<String, ShellError> {
        let window = web_sys::window().ok_or_else(|| ShellError::Http("no window object".into()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response: Response = value.dyn_into().map_err(js_error)?;
        if !response.ok() {
            return Err(ShellError::Http(format!(
                "{} {} for {}",
                response.status(),
                response.status_text(),
                url
            )));
        }

        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        body.as_string()
            .ok_or_else(|| ShellError::Http("response body is not text".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use local::LocalFileClient;

#[cfg(not(target_arch = "wasm32"))]
mod local {
    use super::HttpClient;
    use crate::error::ShellError;
    use futures::future::{self, FutureExt, LocalBoxFuture};
    use std::path::PathBuf;

    /// Serves relative urls from a directory on disk. Used by the REPL so the
    /// same `pages/*.html` fragments the site ships can be browsed offline.
    #[derive(Debug, Clone)]
    pub struct LocalFileClient {
        base: PathBuf,
    }

    impl LocalFileClient {
        pub fn new(base: impl Into<PathBuf>) -> Self {
            Self { base: base.into() }
        }
    }

    impl HttpClient for LocalFileClient {
        fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ShellError>> {
            let result = if url.starts_with("http://") || url.starts_with("https://") {
                Err(ShellError::Http("network requests only work in the browser (WASM)".into()))
            } else {
                let path = self.base.join(url.trim_start_matches('/'));
                std::fs::read_to_string(&path)
                    .map_err(|e| ShellError::Http(format!("{}: {}", path.display(), e)))
            };
            future::ready(result).boxed_local()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_local_client_reads_relative_files() {
        let dir = std::env::temp_dir().join(format!("portfolio-net-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("pages")).unwrap();
        std::fs::write(dir.join("pages/about.html"), "<section id=\"about-page\"></section>").unwrap();

        let client = LocalFileClient::new(&dir);
        let body = block_on(client.get_text("pages/about.html")).unwrap();
        assert!(body.contains("about-page"));
        assert!(block_on(client.get_text("pages/missing.html")).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_local_client_refuses_network() {
        let client = LocalFileClient::new(".");
        let err = block_on(client.get_text("https://example.com")).unwrap_err();
        assert!(matches!(err, ShellError::Http(_)));
    }

    #[test]
    fn test_get_json_reports_bad_payload() {
        let dir = std::env::temp_dir().join(format!("portfolio-json-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("ok.json"), r#"{"text":"hi"}"#).unwrap();
        std::fs::write(dir.join("bad.json"), "not json").unwrap();

        let client = LocalFileClient::new(&dir);
        assert_eq!(block_on(client.get_json("ok.json")).unwrap()["text"], "hi");
        assert!(block_on(client.get_json("bad.json")).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
