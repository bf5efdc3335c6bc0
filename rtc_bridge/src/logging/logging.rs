// rtc_bridge/src/logging/logging.rs
use crate::config::config::LoggingConfig;
use crate::error::BridgeResult;
use std::io::Write;
use std::sync::Mutex;
use flexi_logger::*;
use log::Record;
use once_cell::sync::Lazy;

// Most recent message logged through the bridge macros.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Logs through the `log` facade and remembers the message so the host
/// can surface the last bridge diagnostic.
#[macro_export]
macro_rules! bridge_log {
    ($lvl:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        ::log::log!($lvl, "{}", msg);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = msg;
        }
    }};
}

/// Info level `bridge_log!`.
#[macro_export]
macro_rules! bridge_info  { ($($arg:tt)*) => { $crate::bridge_log!(::log::Level::Info,  $($arg)*) }; }

/// Warn level `bridge_log!`.
#[macro_export]
macro_rules! bridge_warn  { ($($arg:tt)*) => { $crate::bridge_log!(::log::Level::Warn,  $($arg)*) }; }

/// Error level `bridge_log!`.
#[macro_export]
macro_rules! bridge_error { ($($arg:tt)*) => { $crate::bridge_log!(::log::Level::Error, $($arg)*) }; }

#[macro_export]
macro_rules! bridge_debug { ($($arg:tt)*) => { $crate::bridge_log!(::log::Level::Debug, $($arg)*) }; }

/// Returns a copy of the most recent bridge diagnostic.
pub fn last_log() -> String {
    LAST_LOG
        .lock()
        .map(|buf| buf.clone())
        .unwrap_or_default()
}

/// Initializes the process logger. Logs go to rotating files when a
/// directory is configured, otherwise to stderr.
pub fn init_file_logger(config: &LoggingConfig) -> BridgeResult<LoggerHandle> {
    let mut logger = Logger::try_with_str(&config.level)?.format(bridge_formatter);

    match &config.directory {
        Some(dir) => {
            let file_spec = FileSpec::default()
                .directory(dir)
                .basename(config.basename.clone())
                .suffix("log");

            logger = logger
                .log_to_file(file_spec)
                .rotate(
                    Criterion::Size(5_000_000),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(5),
                )
                .write_mode(WriteMode::BufferAndFlush);

            if config.to_stderr {
                logger = logger.duplicate_to_stderr(Duplicate::Warn);
            }
        }
        None => logger = logger.log_to_stderr(),
    }

    let handle = logger.start()?;

    if let Some(dir) = &config.directory {
        crate::bridge_info!("Log dir: {}.", dir.display());
    }
    Ok(handle)
}

fn bridge_formatter(
    write: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}

