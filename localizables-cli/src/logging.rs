use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `-v`; without either, library logs stay silent and
/// only the regular command output is shown.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
