pub mod advertisements;

use adboard_kernel::ModuleRegistry;

use advertisements::store::SharedStore;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: SharedStore) -> anyhow::Result<()> {
    registry.register(advertisements::create_module(store))
}
