use anyhow::Context;
use adboard_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load adboard settings")?;
    adboard_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.store.backend,
        port = settings.server.port,
        "adboard-app bootstrap starting"
    );

    adboard_app::serve(settings).await
}
