use std::{fs, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Route tracing output to `path`. The terminal belongs to the dashboard, so
/// nothing is ever written to stdout or stderr while it runs.
///
/// Filtering follows `PLOTDASH_LOG` (same syntax as `RUST_LOG`), defaulting to
/// info level for both workspace crates.
pub fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env("PLOTDASH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("plotdash=info,plotdash_probe=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
