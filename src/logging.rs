use log::LevelFilter;

/// Install the logger: the browser console on wasm, `env_logger` on stderr
/// everywhere else. `RUST_LOG` overrides `level` natively. Calling it again
/// only adjusts the level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    console::init(level);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    use env_logger::{Builder, Env};

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format_timestamp_millis();
    if builder.try_init().is_err() {
        // already installed (tests, or a second Terminal)
        log::set_max_level(level);
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    /// `log` backend writing to `console.*`.
    pub struct ConsoleLogger;

    static LOGGER: ConsoleLogger = ConsoleLogger;

    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_err() {
            log::debug!("logger already installed");
        }
        log::set_max_level(level);
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = JsValue::from_str(&format!("[{}] {}: {}", record.level(), record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_adjusts_level() {
        init(LevelFilter::Warn);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(log::log_enabled!(log::Level::Error));
        assert!(!log::log_enabled!(log::Level::Info));
    }
}
