//! Logging and tracing bootstrap.

use adboard_kernel::settings::{LogFormat, TelemetrySettings};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Calling this twice is an
/// error, which binaries surface and tests simply ignore.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::debug!(
        target: "adboard-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_parsed() {
        let settings = TelemetrySettings {
            filter: "adboard_app=debug,tower_http=info".to_string(),
            log_format: LogFormat::Json,
        };
        // RUST_LOG may be set by the developer; either way a filter results.
        assert!(build_filter(&settings).is_ok());
    }

    #[test]
    fn second_init_fails_cleanly() {
        let settings = TelemetrySettings::default();
        let _ = init(&settings);
        assert!(init(&settings).is_err());
    }
}
