use ffmap_core::Settings;
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Map the `loglevel` setting to a filter.
///
/// Accepts the numeric levels of the config file (0 = error .. 4 = trace)
/// as well as level names. Anything else falls back to info.
pub fn level_from_setting(raw: &str) -> LevelFilter {
    let raw = raw.trim();
    match raw.parse::<u8>() {
        Ok(0) => LevelFilter::ERROR,
        Ok(1) => LevelFilter::WARN,
        Ok(2) => LevelFilter::INFO,
        Ok(3) => LevelFilter::DEBUG,
        Ok(_) => LevelFilter::TRACE,
        Err(_) => LevelFilter::from_str(raw).unwrap_or(LevelFilter::INFO),
    }
}

/// Send tracing output to the configured log file, or to stderr when the
/// file cannot be opened. `RUST_LOG` overrides the configured level.
///
/// Returns the reason when the log file could not be used.
pub fn init_logging(settings: &Settings) -> Option<String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level_from_setting(&settings.loglevel).into()));

    let (writer, ansi, fallback) = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.logfile)
    {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false, None),
        Err(e) => (
            BoxMakeWriter::new(std::io::stderr),
            true,
            Some(format!(
                "Cannot open log file {}: {}, logging to stderr",
                settings.logfile.display(),
                e
            )),
        ),
    };

    // A subscriber may already be installed (tests, repeated calls)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();

    fallback
}
