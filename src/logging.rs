//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;

pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init_logging(config: &LogConfig) -> LoggingGuard {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    if let Err(err) = std::fs::create_dir_all(&config.dir) {
        // No file to write to; run without a subscriber.
        eprintln!(
            "File logging disabled ({}): {}",
            config.dir.display(),
            err
        );
        return LoggingGuard { _file_guard: None };
    }

    let file_appender = tracing_appender::rolling::daily(&config.dir, "brickgame.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .with_ansi(false)
                .compact()
                .with_writer(file_writer),
        )
        .try_init()
        .ok();

    LoggingGuard {
        _file_guard: Some(guard),
    }
}
