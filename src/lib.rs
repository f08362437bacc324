//! Advertisement board service
//!
//! Wires the advertisements module and its store into the shared kernel
//! lifecycle and HTTP server.

#![recursion_limit = "256"]

pub mod modules;

use adboard_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use anyhow::Context;

pub use modules::advertisements::{
    build_store,
    models::{Advertisement, AdvertisementId},
    store::{AdvertisementStore, SharedStore},
};

/// Build the module registry around an already constructed store
pub fn registry(store: SharedStore) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store)?;
    Ok(registry)
}

/// Run the service until shutdown: build the store, bring modules up,
/// serve HTTP, then stop modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let store = build_store(&settings)
        .await
        .context("failed to build advertisement store")?;
    let registry = registry(store)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = adboard_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
