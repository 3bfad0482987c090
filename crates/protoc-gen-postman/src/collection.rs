//! Postman collection (v2.1) document model.
//!
//! Only the subset of the format the generator emits is modelled. Empty
//! optional members are left out of the output and default back in on input,
//! so a generated document survives a JSON round trip unchanged.

use serde::{Deserialize, Serialize};

/// Schema identifier written to `info.schema`.
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Top-level collection document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name and format identifier.
    pub info: Info,
    /// Package folders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<Item>,
}

/// `info` block of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Display name (e.g., `version.20240101093000`).
    pub name: String,
    /// Always [`COLLECTION_SCHEMA`].
    pub schema: String,
}

/// A folder (children in `item`) or a leaf request (`request` set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Folder name, or `Method(description)` for leaves.
    pub name: String,
    /// Present on leaf items only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    /// Present on folders only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<Item>,
}

impl Item {
    /// An empty folder.
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: None,
            item: Vec::new(),
        }
    }

    /// A leaf holding `request`.
    #[must_use]
    pub fn leaf(name: impl Into<String>, request: Request) -> Self {
        Self {
            name: name.into(),
            request: Some(request),
            item: Vec::new(),
        }
    }
}

/// One example HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// `GET` or `POST`.
    pub method: String,
    /// Headers declared in comments plus configured static headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,
    /// JSON body (POST only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// Target URL.
    pub url: Url,
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name.
    pub key: String,
    /// Header value (a placeholder in generated requests).
    pub value: String,
    /// Postman value type, always `text` here.
    #[serde(rename = "type")]
    pub r#type: String,
}

impl Header {
    /// A plain-text header.
    #[must_use]
    pub fn text(key: String, value: String) -> Self {
        Self {
            key,
            value,
            r#type: "text".to_string(),
        }
    }
}

/// Raw request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Always `raw`.
    pub mode: String,
    /// Body text (pretty-printed JSON).
    pub raw: String,
    /// Editor hints.
    pub options: BodyOptions,
}

impl Body {
    /// A raw body rendered with JSON highlighting.
    #[must_use]
    pub fn json(raw: String) -> Self {
        Self {
            mode: "raw".to_string(),
            raw,
            options: BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            },
        }
    }
}

/// `body.options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyOptions {
    /// `body.options.raw`.
    pub raw: RawOptions,
}

/// `body.options.raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    /// Always `json`.
    pub language: String,
}

/// Structured request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    /// Full URL text, `{{domain}}` prefixed.
    pub raw: String,
    /// Always the single domain variable.
    pub host: Vec<String>,
    /// Path template segments.
    pub path: Vec<String>,
    /// Query parameters (GET only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<Query>,
}

/// One query-string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Dotted field path (e.g., `filter.name`).
    pub key: String,
    /// Placeholder value text.
    pub value: String,
}
