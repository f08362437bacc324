//! MongoDB client factory.

use adboard_kernel::settings::DatabaseSettings;
use anyhow::Context;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};

const APP_NAME: &str = "adboard";

/// Connect to MongoDB, select the configured database and ping it.
///
/// The ping makes a bad connection string or unreachable server fail at
/// startup instead of on the first request.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(&settings.connection_string)
        .await
        .context("invalid MongoDB connection string")?;
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options).context("failed to build MongoDB client")?;
    let database = client.database(&settings.database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("failed to reach MongoDB database '{}'", settings.database))?;

    tracing::info!(
        target: "adboard-db",
        database = %settings.database,
        "connected to MongoDB"
    );
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_connection_string_is_rejected() {
        let settings = DatabaseSettings {
            connection_string: "not-a-mongo-uri".to_string(),
            ..DatabaseSettings::default()
        };
        let err = connect(&settings).await.unwrap_err();
        assert!(format!("{:#}", err).contains("invalid MongoDB connection string"));
    }
}
