// browser entry point: the page's JS owns the input box and the log,
// this owns everything else
use crate::completion::TabCompletion;
use crate::config::PortfolioConfig;
use crate::context::TerminalContext;
use crate::dispatcher::{Dispatcher, PendingOutput};
use crate::dom::DomRenderer;
use crate::events::{self, OutputSink};
use crate::logging;
use crate::net::FetchClient;
use crate::output::OutputLine;
use crate::storage::{self, BrowserStore, KeyValueStore, MemoryStore, Preferences};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// better errors in browser console
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Reply to `execute_command`.
#[derive(Serialize)]
pub struct CommandResponse {
    pub lines: Vec<OutputLine>,
    pub clear_screen: bool,
    /// More output will arrive through the output callback.
    pub pending: bool,
    pub prompt: String,
}

/// Payload handed to the output callback / `terminal-output` event.
#[derive(Serialize)]
struct OutputEvent<'a> {
    lines: &'a [OutputLine],
}

#[derive(Serialize)]
struct CompletionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    replaced: Option<String>,
    lines: Vec<OutputLine>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        log::error!("serialize failed: {}", e);
        JsValue::NULL
    })
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn store(found: Option<BrowserStore>) -> Box<dyn KeyValueStore> {
    match found {
        Some(store) => Box::new(store),
        None => {
            log::warn!("web storage unavailable, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[wasm_bindgen]
pub struct Terminal {
    dispatcher: Dispatcher,
    sink: Rc<RefCell<OutputSink>>,
    prefs: Preferences,
}

#[wasm_bindgen]
impl Terminal {
    /// `config_json` replaces the built-in `portfolio.json` when given.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Terminal, JsValue> {
        let config = match config_json {
            Some(json) => PortfolioConfig::from_json(&json),
            None => PortfolioConfig::builtin(),
        }
        .map_err(js_err)?;
        logging::init(config.log_level());

        let bounds = config.terminal;
        let renderer = Rc::new(RefCell::new(DomRenderer::new().map_err(js_err)?));
        let ctx = TerminalContext::new(Rc::new(config), renderer, Rc::new(FetchClient)).map_err(js_err)?;
        let prefs = Preferences::new(store(BrowserStore::session()), store(BrowserStore::local()), bounds);
        log::info!("terminal ready");

        Ok(Terminal {
            dispatcher: Dispatcher::new(ctx),
            sink: Rc::new(RefCell::new(OutputSink::default())),
            prefs,
        })
    }

    /// Register `callback(payload)` for output that settles later.
    #[wasm_bindgen]
    pub fn set_output_callback(&mut self, callback: js_sys::Function) {
        self.sink.borrow_mut().set_callback(callback);
    }

    /// Load and show the home page.
    #[wasm_bindgen]
    pub fn start(&self) {
        self.spawn(self.dispatcher.start());
    }

    // main entry point - run a command and return result
    #[wasm_bindgen]
    pub fn execute_command(&mut self, input: &str) -> JsValue {
        let dispatch = self.dispatcher.dispatch(input);
        let pending = dispatch.pending.is_some();
        if let Some(output) = dispatch.pending {
            self.spawn(output);
        }

        to_js(&CommandResponse {
            lines: dispatch.lines,
            clear_screen: dispatch.clear_screen,
            pending,
            prompt: self.dispatcher.prompt(),
        })
    }

    #[wasm_bindgen]
    pub fn history_previous(&mut self) -> Option<String> {
        self.dispatcher.history_previous()
    }

    #[wasm_bindgen]
    pub fn history_next(&mut self) -> Option<String> {
        self.dispatcher.history_next()
    }

    #[wasm_bindgen]
    pub fn complete(&self, input: &str) -> JsValue {
        let completion = self.dispatcher.complete(input);
        let lines = completion.listing();
        let replaced = match completion {
            TabCompletion::Replaced(text) => Some(text),
            _ => None,
        };
        to_js(&CompletionResponse { replaced, lines })
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> String {
        self.dispatcher.prompt()
    }

    #[wasm_bindgen]
    pub fn current_directory(&self) -> String {
        self.dispatcher.ctx().navigator.path().to_string()
    }

    #[wasm_bindgen]
    pub fn active_page(&self) -> Option<String> {
        self.dispatcher.ctx().presenter.active_page()
    }

    #[wasm_bindgen]
    pub fn get_command_list(&self) -> JsValue {
        to_js(&self.dispatcher.registry().get_command_names())
    }

    #[wasm_bindgen]
    pub fn welcome_banner(&self) -> JsValue {
        to_js(&self.dispatcher.welcome_banner())
    }

    /// True on the first load of a browser session.
    #[wasm_bindgen]
    pub fn should_play_boot(&self) -> bool {
        !self.prefs.has_booted()
    }

    #[wasm_bindgen]
    pub fn mark_booted(&mut self) {
        if let Err(e) = self.prefs.mark_booted() {
            log::warn!("{}", e);
        }
    }

    #[wasm_bindgen]
    pub fn saved_terminal_height(&self, viewport_height: f64) -> Option<f64> {
        self.prefs.saved_terminal_height(viewport_height)
    }

    /// Height while dragging the resize handle.
    #[wasm_bindgen]
    pub fn resize_terminal(&self, start_height: f64, start_y: f64, current_y: f64, viewport_height: f64) -> f64 {
        storage::resize_height(start_height, start_y, current_y, viewport_height, self.prefs.bounds())
    }

    #[wasm_bindgen]
    pub fn save_terminal_height(&mut self, height: f64) {
        if let Err(e) = self.prefs.save_terminal_height(height) {
            log::warn!("{}", e);
        }
    }
}

impl Terminal {
    fn spawn(&self, pending: PendingOutput) {
        let sink = Rc::clone(&self.sink);
        spawn_local(async move {
            let output = pending.await;
            if !output.lines.is_empty() {
                // clone the callback out, JS may call set_output_callback from inside it
                let callback = sink.borrow().callback();
                events::deliver(callback.as_ref(), &OutputEvent { lines: &output.lines });
            }
            if let Some(delayed) = output.delayed {
                TimeoutFuture::new(delayed.after_ms).await;
                let callback = sink.borrow().callback();
                events::deliver(callback.as_ref(), &OutputEvent { lines: &delayed.lines });
            }
        });
    }
}
