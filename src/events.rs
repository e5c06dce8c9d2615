use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{window, CustomEvent, CustomEventInit};

/// DOM event fired on `window` when no callback is registered.
pub const OUTPUT_EVENT: &str = "terminal-output";

/// Delivers output that settles after `execute_command` has returned
/// (page loads, API commands, the delayed punchline). A registered JS
/// callback wins; otherwise a `terminal-output` CustomEvent carries the
/// payload in `detail`.
#[derive(Default)]
pub struct OutputSink {
    callback: Option<js_sys::Function>,
}

impl OutputSink {
    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }

    /// A handle to the registered callback. Call it through [`deliver`]
    /// after the sink borrow is gone: the callback may register a new one.
    pub fn callback(&self) -> Option<js_sys::Function> {
        self.callback.clone()
    }
}

pub fn deliver<T: Serialize>(callback: Option<&js_sys::Function>, payload: &T) {
    let data = match serde_wasm_bindgen::to_value(payload) {
        Ok(data) => data,
        Err(e) => {
            log::error!("could not serialize terminal output: {}", e);
            return;
        }
    };

    if let Some(callback) = callback {
        match callback.call1(&JsValue::NULL, &data) {
            Ok(_) => return,
            Err(e) => log::warn!("output callback failed: {:?}", e),
        }
    }
    dispatch_event(&data);
}

fn dispatch_event(detail: &JsValue) {
    let Some(win) = window() else {
        log::warn!("no window, dropping terminal output");
        return;
    };

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(detail);

    match CustomEvent::new_with_event_init_dict(OUTPUT_EVENT, &init) {
        Ok(event) => {
            if let Err(e) = win.dispatch_event(&event) {
                log::error!("{} dispatch failed: {:?}", OUTPUT_EVENT, e);
            }
        }
        Err(e) => log::error!("could not create {} event: {:?}", OUTPUT_EVENT, e),
    }
}
