//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Map the numeric level used by the JS API: 0=off, 1=error .. 5=trace.
pub(crate) fn level_filter(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the console logger. Calling it again only changes the level.
pub(crate) fn install(level: LevelFilter) {
    // set_logger fails once a logger is installed, which is fine here
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(0), LevelFilter::Off);
        assert_eq!(level_filter(2), LevelFilter::Warn);
        assert_eq!(level_filter(4), LevelFilter::Debug);
        assert_eq!(level_filter(9), LevelFilter::Trace);
    }

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(
                &Record::builder()
                    .level(Level::Warn)
                    .target("photoprep_core::decode")
                    .args(format_args!("orientation unavailable"))
                    .build()
            ),
            "[WARN] photoprep_core::decode: orientation unavailable"
        );
    }
}

/// WASM-specific tests that write through `web_sys::console`.
///
/// The console bindings only exist on wasm32 targets. Use `wasm-pack test`
/// to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_installs_warn_level() {
        crate::init();
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }

    #[wasm_bindgen_test]
    fn test_logs_at_every_level() {
        crate::init_logging(5);
        assert_eq!(log::max_level(), LevelFilter::Trace);

        log::error!("error through console.error");
        log::warn!("warning through console.warn");
        log::info!("info through console.info");
        log::debug!("debug through console.debug");
        log::trace!("trace through console.debug");
    }

    #[wasm_bindgen_test]
    fn test_disabled_levels_are_skipped() {
        crate::init_logging(1);
        assert!(!LOGGER.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(LOGGER.enabled(&Metadata::builder().level(Level::Error).build()));

        // Filtered out before reaching the console
        log::info!("not shown");
    }

    #[wasm_bindgen_test]
    fn test_pipeline_warnings_reach_console() {
        crate::init_logging(2);
        // No EXIF and no recognizable header: both fallbacks warn
        assert_eq!(crate::estimate_sample_size(&[0x00, 0x01], 64, 64).unwrap(), 1);
        assert_eq!(crate::read_orientation_degrees(&[0x00, 0x01]), 0);
    }
}
