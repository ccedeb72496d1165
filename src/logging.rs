use std::fs;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped, so `main` must
/// hold it for the whole run.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    // Ensure logs directory exists; fall back to console only if it can't be made
    let file_setup = fs::create_dir_all(&config.dir).ok().map(|_| {
        let file_appender = tracing_appender::rolling::daily(&config.dir, &config.file_prefix);
        tracing_appender::non_blocking(file_appender)
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("menu_cleaner=info,warn"));

    match file_setup {
        Some((writer, guard)) => {
            let (json_layer, text_layer) = if config.json {
                (Some(fmt::layer().json().with_writer(writer)), None)
            } else {
                (None, Some(fmt::layer().with_ansi(false).with_writer(writer)))
            };
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .with(text_layer)
                .with(console_layer())
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer())
                .init();
            None
        }
    }
}

// Console output goes to stderr so `--json` reports on stdout stay parseable
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_target(true).with_writer(std::io::stderr)
}
