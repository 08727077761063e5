use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Name of the append-only log file inside the log directory.
pub const LOG_FILE_NAME: &str = "cpv_api.log";

/// Initialize process-wide logging: timestamped lines to stdout and to an
/// append-only file under `log_dir` (created if absent).
///
/// Called once at startup and never reconfigured. `RUST_LOG` overrides the
/// default level; `verbose` bumps the default from `info` to `debug`.
pub fn init(log_dir: &Path, verbose: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // ANSI codes would corrupt the file sink, so color is off for both.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stdout.and(Arc::new(log_file)))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
