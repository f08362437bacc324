//! HTTP handlers for the advertisements module.

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use adboard_http::error::AppError;

use super::models::{Advertisement, AdvertisementPatch, CreateAdvertisement, SearchFilter};
use super::render::{render, Representation};
use super::store::SharedStore;

const REQUIRED_FIELDS_MESSAGE: &str = "No required fields";
const NOT_FOUND_MESSAGE: &str = "Advertisement not found";
const NO_MATCH_MESSAGE: &str = "No matching advertisement found";

/// Routes relative to the module mount point.
///
/// `/search` is a static segment, so it takes precedence over `/{id}`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_advertisements).post(create_advertisement))
        .route("/search", get(search_advertisements))
        .route(
            "/{id}",
            get(get_advertisement)
                .put(update_advertisement)
                .delete(delete_advertisement),
        )
        .with_state(store)
}

fn not_found() -> AppError {
    AppError::not_found(NOT_FOUND_MESSAGE)
}

fn malformed_body(rejection: JsonRejection) -> AppError {
    AppError::validation(
        vec![json!({ "error": rejection.body_text() })],
        "Malformed request body",
    )
}

async fn create_advertisement(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateAdvertisement>, JsonRejection>,
) -> Result<(StatusCode, Json<Advertisement>), AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    // Nothing is stored when a field is missing.
    let new = payload.validate().map_err(|missing| {
        AppError::validation(
            missing
                .into_iter()
                .map(|field| json!({ "field": field, "error": "required" }))
                .collect(),
            REQUIRED_FIELDS_MESSAGE,
        )
    })?;

    let advertisement = store.create(new).await?;
    tracing::info!(
        id = %advertisement.id,
        backend = store.backend(),
        "advertisement created"
    );
    Ok((StatusCode::CREATED, Json(advertisement)))
}

async fn get_advertisement(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let advertisement = store.get(&id).await?.ok_or_else(not_found)?;

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let representation = Representation::negotiate(accept).ok_or_else(|| {
        AppError::not_acceptable(format!(
            "Supported representations: {}",
            Representation::OFFERED.join(", ")
        ))
    })?;

    let body = render(&advertisement, representation)
        .with_context(|| format!("failed to render advertisement {}", advertisement.id))?;

    Ok((
        [
            (header::CONTENT_TYPE, representation.content_type()),
            (header::VARY, "Accept"),
        ],
        body,
    )
        .into_response())
}

async fn list_advertisements(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Advertisement>>, AppError> {
    Ok(Json(store.list().await?))
}

async fn delete_advertisement(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if store.delete(&id).await? {
        tracing::info!(%id, backend = store.backend(), "advertisement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

async fn update_advertisement(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<AdvertisementPatch>, JsonRejection>,
) -> Result<Json<Advertisement>, AppError> {
    let Json(patch) = payload.map_err(malformed_body)?;

    let advertisement = store.update(&id, patch).await?.ok_or_else(not_found)?;
    tracing::info!(%id, backend = store.backend(), "advertisement updated");
    Ok(Json(advertisement))
}

async fn search_advertisements(
    State(store): State<SharedStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Advertisement>>, AppError> {
    let filter = SearchFilter::from_pairs(pairs);
    let found = store.search(&filter).await?;
    tracing::debug!(?filter, matches = found.len(), "advertisement search");

    if found.is_empty() {
        return Err(AppError::not_found(NO_MATCH_MESSAGE));
    }
    Ok(Json(found))
}
