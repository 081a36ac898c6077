use std::convert::Infallible;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::{BodyExt, combinators::BoxBody};
use hyper::{Request, Response, StatusCode};
use tracing::{info, warn};

use crate::AppState;
use crate::handlers::http::utils::{deliver_msg_json, deliver_serialized_json};
use crate::store::ItemStore;
use shared::types::{
    CreateItemData, ItemChangeResponse, ItemError, ItemResponse, ItemsResponse, UpdateItemData,
};

// ---------------------------------------------------------------------------
// Handlers
//
// Auth is performed by the router BEFORE these handlers are called.
// Every handler runs only after the bearer token has been verified; none of
// them calls any auth function internally.  Any valid token grants access —
// items are not scoped per user.
// ---------------------------------------------------------------------------

/// GET /items — the whole collection, insertion-ordered.
pub async fn handle_list_items(
    _req: Request<hyper::body::Incoming>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing list items request");
    respond_list(&state.items).await
}

/// GET /items/:id — a single item, 404 when absent.
pub async fn handle_get_item(
    _req: Request<hyper::body::Incoming>,
    state: AppState,
    item_id: i64,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing get item request for id {}", item_id);
    respond_get(&state.items, item_id).await
}

/// POST /items — create an item from the JSON body.
///
/// Creation never fails on content: absent fields are stored as null.
/// Only an unreadable body is rejected.
pub async fn handle_create_item(
    req: Request<hyper::body::Incoming>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing create item request");

    let data = match parse_body::<CreateItemData>(req).await {
        Ok(data) => data,
        Err(item_error) => {
            warn!("Create item parsing failed: {}", item_error.to_message());
            return deliver_msg_json(item_error.to_message(), item_error.status());
        }
    };

    respond_create(&state.items, data).await
}

/// PUT /items/:id — partial update, 404 when absent.
pub async fn handle_update_item(
    req: Request<hyper::body::Incoming>,
    state: AppState,
    item_id: i64,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing update item request for id {}", item_id);

    let data = match parse_body::<UpdateItemData>(req).await {
        Ok(data) => data,
        Err(item_error) => {
            warn!("Update item parsing failed: {}", item_error.to_message());
            return deliver_msg_json(item_error.to_message(), item_error.status());
        }
    };

    respond_update(&state.items, item_id, data).await
}

/// DELETE /items/:id — always acknowledged with 200, present or not.
pub async fn handle_delete_item(
    _req: Request<hyper::body::Incoming>,
    state: AppState,
    item_id: i64,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing delete item request for id {}", item_id);
    respond_delete(&state.items, item_id).await
}

// ---------------------------------------------------------------------------
// Path helper
// ---------------------------------------------------------------------------

/// Pull the `:id` segment out of an `/items/:id` path.
/// Query strings are stripped the same way route matching strips them.
pub fn extract_item_id(path: &str) -> Option<i64> {
    let clean = path.split('?').next().unwrap_or(path);
    clean.split('/').nth(2).and_then(|s| s.parse::<i64>().ok())
}

// ---------------------------------------------------------------------------
// Response builders
//
// Separate from the request-facing handlers so each status/body pair can be
// exercised directly against an in-memory store.
// ---------------------------------------------------------------------------

async fn respond_list(store: &ItemStore) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let items = store.list().await;
    deliver_serialized_json(&ItemsResponse { items }, StatusCode::OK)
}

async fn respond_get(
    store: &ItemStore,
    item_id: i64,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    match store.get(item_id).await {
        Some(item) => deliver_serialized_json(&ItemResponse { item }, StatusCode::OK),
        None => {
            warn!("Item {} not found", item_id);
            deliver_msg_json(ItemError::NotFound.to_message(), ItemError::NotFound.status())
        }
    }
}

async fn respond_create(
    store: &ItemStore,
    data: CreateItemData,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let item = store.create(data).await;
    info!("Item {} created", item.id);

    deliver_serialized_json(
        &ItemChangeResponse {
            msg: "Item created".to_string(),
            item,
        },
        StatusCode::CREATED,
    )
}

async fn respond_update(
    store: &ItemStore,
    item_id: i64,
    data: UpdateItemData,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    match store.update(item_id, data).await {
        Some(item) => {
            info!("Item {} updated", item.id);
            deliver_serialized_json(
                &ItemChangeResponse {
                    msg: "Item updated".to_string(),
                    item,
                },
                StatusCode::OK,
            )
        }
        None => {
            warn!("Item {} not found for update", item_id);
            deliver_msg_json(ItemError::NotFound.to_message(), ItemError::NotFound.status())
        }
    }
}

async fn respond_delete(
    store: &ItemStore,
    item_id: i64,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let removed = store.delete(item_id).await;
    info!("Item {} delete processed (existed: {})", item_id, removed);

    deliver_msg_json("Item deleted", StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

async fn parse_body<T: serde::de::DeserializeOwned>(
    req: Request<hyper::body::Incoming>,
) -> std::result::Result<T, ItemError> {
    let body = req
        .collect()
        .await
        .map_err(|_| ItemError::InvalidBody)?
        .to_bytes();

    serde_json::from_slice(&body).map_err(|_| ItemError::InvalidBody)
}
