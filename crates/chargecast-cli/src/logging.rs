use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Where log events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogTarget {
    /// No subscriber is installed. Used by the interactive form, which owns the terminal.
    Disabled,
    Stderr,
    File(PathBuf),
}

/// Installs the global `tracing` subscriber.
///
/// `level` is the default filter; a `RUST_LOG` directive overrides it.
pub(crate) fn init(target: &LogTarget, level: LevelFilter) -> anyhow::Result<()> {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy()
    };

    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    result.map_err(|err| anyhow::anyhow!(err).context("Failed to install log subscriber"))
}
