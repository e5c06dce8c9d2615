use crate::config::TerminalBounds;
use crate::error::ShellError;
use std::collections::HashMap;

const BOOTED_KEY: &str = "hasBooted";
const HEIGHT_KEY: &str = "terminalHeight";

/// String key/value persistence (the shape of `window.sessionStorage` and
/// `window.localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use crate::error::ShellError;
    use web_sys::Storage;

    pub struct BrowserStore {
        storage: Storage,
    }

    impl BrowserStore {
        pub fn session() -> Option<Self> {
            let storage = web_sys::window()?.session_storage().ok()??;
            Some(Self { storage })
        }

        pub fn local() -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok()??;
            Some(Self { storage })
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
            self.storage
                .set_item(key, value)
                .map_err(|e| ShellError::Storage(format!("{}: {:?}", key, e)))
        }
    }
}

/// Per-visitor settings: the boot flag lives for the session, the terminal
/// height survives reloads.
pub struct Preferences {
    session: Box<dyn KeyValueStore>,
    local: Box<dyn KeyValueStore>,
    bounds: TerminalBounds,
}

impl Preferences {
    pub fn new(session: Box<dyn KeyValueStore>, local: Box<dyn KeyValueStore>, bounds: TerminalBounds) -> Self {
        Self { session, local, bounds }
    }

    pub fn in_memory(bounds: TerminalBounds) -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()), bounds)
    }

    pub fn has_booted(&self) -> bool {
        self.session.get(BOOTED_KEY).as_deref() == Some("true")
    }

    pub fn mark_booted(&mut self) -> Result<(), ShellError> {
        self.session.set(BOOTED_KEY, "true")
    }

    /// Last saved height, clamped to what `viewport_height` allows now.
    /// Garbage in storage reads as nothing saved.
    pub fn saved_terminal_height(&self, viewport_height: f64) -> Option<f64> {
        let raw = self.local.get(HEIGHT_KEY)?;
        let height = raw.trim().parse::<f64>().ok().filter(|h| h.is_finite())?;
        Some(clamp_height(height, viewport_height, self.bounds))
    }

    pub fn save_terminal_height(&mut self, height: f64) -> Result<(), ShellError> {
        log::debug!("saving terminal height {}", height);
        self.local.set(HEIGHT_KEY, &height.round().to_string())
    }

    pub fn bounds(&self) -> TerminalBounds {
        self.bounds
    }
}

fn clamp_height(height: f64, viewport_height: f64, bounds: TerminalBounds) -> f64 {
    height
        .min(viewport_height * bounds.max_height_ratio)
        .max(bounds.min_height)
}

/// New terminal height while dragging the resize handle. Dragging up
/// (`current_y < start_y`) grows the terminal.
pub fn resize_height(
    start_height: f64,
    start_y: f64,
    current_y: f64,
    viewport_height: f64,
    bounds: TerminalBounds,
) -> f64 {
    // handle sits on top of the terminal, dragging up makes it taller
    clamp_height(start_height + (start_y - current_y), viewport_height, bounds)
}
