use http::StatusCode;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Item wire types
// ---------------------------------------------------------------------------

/// A single item record as it appears on the wire.
///
/// `name` and `description` are nullable: items created from a body with
/// missing fields carry `null` for those fields, and that is preserved on
/// every later read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST /items`.  Both fields are optional — creation never fails
/// on missing fields.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemData {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /items/{id}`.  Only the fields whose key appears in the body
/// are replaced: a key carrying JSON `null` clears the stored value, while an
/// omitted key keeps it.  The outer `Option` records key presence, the inner
/// one the value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemData {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
}

/// Keeps "key present with `null`" distinct from "key absent": serde only
/// calls this when the key appeared, so the outer `Option` is always `Some`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// `GET /items` — `{"items": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

/// `GET /items/{id}` — `{"item": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: Item,
}

/// Create / update envelope — `{"msg": "...", "item": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemChangeResponse {
    pub msg: String,
    pub item: Item,
}

// ---------------------------------------------------------------------------
// Item errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ItemError {
    NotFound,
    InvalidId,
    InvalidBody,
}

impl ItemError {
    pub fn to_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Item not found",
            Self::InvalidId => "Invalid item id",
            Self::InvalidBody => "Invalid JSON body",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidId | Self::InvalidBody => StatusCode::BAD_REQUEST,
        }
    }
}
