/// Logger setup: env_logger behind the `log` facade, `info` unless
/// `RUST_LOG` says otherwise.
use log::SetLoggerError;

pub fn init() -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
}

/// Last-resort output for when no logger could be installed.
pub fn write_fallback_line(message: &str) {
    eprintln!("[taskboard.logging] {}", message);
}
