//! Tracing subscriber setup shared by the binaries.
//!
//! `RUST_LOG` controls the filter (default: `info`).

use tracing_subscriber::EnvFilter;

pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
