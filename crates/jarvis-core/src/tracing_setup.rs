use std::fs::OpenOptions;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global tracing subscriber: stderr output filtered by
/// `RUST_LOG` (info by default), plus an append-mode file layer when
/// `JARVIS_LOG_FILE` points somewhere writable.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Ok(log_path) = std::env::var("JARVIS_LOG_FILE") {
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);
                registry.with(file_layer).init();
                eprintln!("File logging enabled: {log_path}");
                return;
            }
            Err(e) => eprintln!("Could not open log file {log_path}: {e}"),
        }
    }

    registry.init();
}
