pub mod models;
pub mod render;
pub mod routes;
pub mod store;

use adboard_kernel::{
    settings::{Settings, StoreBackend},
    InitCtx, Module,
};
use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;

use store::{MemoryAdvertisementStore, MongoAdvertisementStore, SharedStore};

/// Advertisements module: CRUD and search over the configured store
pub struct AdvertisementsModule {
    store: SharedStore,
}

impl AdvertisementsModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for AdvertisementsModule {
    fn name(&self) -> &'static str {
        "advertisements"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = self.store.backend(),
            "advertisements module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "advertisements module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "advertisements module stopped");
        Ok(())
    }
}

/// Build the store selected by `store.backend`.
///
/// The MongoDB backend connects (and pings) here, so a bad connection string
/// fails startup.
pub async fn build_store(settings: &Settings) -> anyhow::Result<SharedStore> {
    let store: SharedStore = match settings.store.backend {
        StoreBackend::Memory => Arc::new(MemoryAdvertisementStore::new()),
        StoreBackend::Mongo => {
            let database = adboard_db::connect(&settings.database)
                .await
                .context("failed to connect advertisement store")?;
            Arc::new(MongoAdvertisementStore::new(
                &database,
                &settings.database.collection,
            ))
        }
    };
    tracing::info!(backend = store.backend(), "advertisement store ready");
    Ok(store)
}

/// Create a new instance of the advertisements module
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(AdvertisementsModule::new(store))
}

fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = serde_json::json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Integer for the in-memory store, ObjectId hex for MongoDB",
        "schema": { "type": "string" }
    });
    let text_param = |name: &str| {
        serde_json::json!({
            "name": name,
            "in": "query",
            "required": false,
            "description": format!("Case-insensitive substring of {}", name),
            "schema": { "type": "string" }
        })
    };
    let advertisement_json = serde_json::json!({
        "application/json": {
            "schema": { "$ref": "#/components/schemas/Advertisement" }
        }
    });
    let advertisement_list = serde_json::json!({
        "application/json": {
            "schema": {
                "type": "array",
                "items": { "$ref": "#/components/schemas/Advertisement" }
            }
        }
    });

    serde_json::json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List advertisements",
                    "tags": ["Advertisements"],
                    "responses": {
                        "200": { "description": "All advertisements", "content": advertisement_list },
                        "500": error_response("Store failure")
                    }
                },
                "post": {
                    "summary": "Create an advertisement",
                    "tags": ["Advertisements"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateAdvertisement" }
                            }
                        }
                    },
                    "responses": {
                        "201": { "description": "Created", "content": advertisement_json },
                        "400": error_response("A required field is missing"),
                        "500": error_response("Store failure")
                    }
                }
            },
            "/search": {
                "get": {
                    "summary": "Search advertisements; all supplied criteria must match",
                    "tags": ["Advertisements"],
                    "parameters": [
                        text_param("title"),
                        text_param("description"),
                        text_param("author"),
                        text_param("category"),
                        {
                            "name": "tags",
                            "in": "query",
                            "required": false,
                            "description": "Repeatable; every tag must be present",
                            "style": "form",
                            "explode": true,
                            "schema": { "type": "array", "items": { "type": "string" } }
                        }
                    ],
                    "responses": {
                        "200": { "description": "Matching advertisements", "content": advertisement_list },
                        "404": error_response("Nothing matched"),
                        "500": error_response("Store failure")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get one advertisement as HTML, plain text or JSON",
                    "tags": ["Advertisements"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": {
                            "description": "The advertisement",
                            "content": {
                                "text/html": { "schema": { "type": "string" } },
                                "text/plain": { "schema": { "type": "string" } },
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Advertisement" }
                                }
                            }
                        },
                        "404": error_response("Advertisement not found"),
                        "406": error_response("No acceptable representation"),
                        "500": error_response("Store failure")
                    }
                },
                "put": {
                    "summary": "Overwrite the supplied fields of an advertisement",
                    "tags": ["Advertisements"],
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UpdateAdvertisement" }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Updated", "content": advertisement_json },
                        "404": error_response("Advertisement not found"),
                        "500": error_response("Store failure")
                    }
                },
                "delete": {
                    "summary": "Delete an advertisement",
                    "tags": ["Advertisements"],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("Advertisement not found"),
                        "500": error_response("Store failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Advertisement": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "oneOf": [{ "type": "integer" }, { "type": "string" }],
                            "description": "Store-assigned identifier"
                        },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "author": { "type": "string" },
                        "category": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } },
                        "price": { "type": "number" }
                    },
                    "required": ["id", "title", "description", "author", "category", "tags", "price"]
                },
                "CreateAdvertisement": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "author": { "type": "string" },
                        "category": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } },
                        "price": { "type": "number" }
                    },
                    "required": ["title", "description", "author", "category", "tags", "price"]
                },
                "UpdateAdvertisement": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "author": { "type": "string" },
                        "category": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } },
                        "price": { "type": "number" }
                    }
                }
            }
        }
    })
}
