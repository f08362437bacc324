use adboard_kernel::settings::{Settings, StoreBackend};
use anyhow::Context;
use clap::{Parser, Subcommand};

/// Advertisement board service
#[derive(Debug, Parser)]
#[command(name = "adboard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Store backend, overriding configuration (memory or mongo)
        #[arg(long)]
        backend: Option<StoreBackend>,
        /// Listening port, overriding configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load adboard settings")?;

    match cli.command {
        Command::Serve { backend, port } => {
            if let Some(backend) = backend {
                settings.store.backend = backend;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            adboard_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                backend = ?settings.store.backend,
                "adboard serve starting"
            );
            adboard_app::serve(settings).await
        }
        Command::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
