//! Diagnostic logging
//!
//! Logging is opt-in through `WIT_LOG` (any `EnvFilter` directive such as
//! `debug` or `wit::artifacts::merge=trace`). Events go to stderr so they never
//! mix with command output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(filter: Option<&str>) -> anyhow::Result<()> {
    let Some(filter) = filter else {
        return Ok(());
    };

    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| anyhow::anyhow!("invalid WIT_LOG filter '{filter}': {e}"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
