//! Layout documents: schema, sources, and load errors.
//!
//! A layout document is a JSON object with three optional members:
//!
//! - `objects`: ordered array of raw object records (see [`crate::normalize`])
//! - `skuDB`: array of `{sku, name, category, tags}` records
//! - `bounds`: explicit `{minX, minY, maxX, maxY}` scene bounds override
//!
//! Parsing is deliberately tolerant below the top level: a member with the
//! wrong shape is treated as absent and an unusable SKU record is skipped.
//! Only an unreadable source, invalid JSON, or a non-object document fails.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::geometry::Aabb;
use crate::normalize::{RawRecord, coerce_number};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no layout specified")]
    MissingSource,
    #[error("failed to load layout {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed layout document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("layout document must be a JSON object")]
    NotAnObject,
}

/// Metadata for one SKU code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuRecord {
    pub sku: String,
    pub name: String,
    pub category: String,
    /// Tags flattened to space-joined text.
    pub tags: String,
}

/// A parsed layout document, ready for normalization.
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    /// Raw object records in document order.
    pub objects: Vec<Value>,
    /// Usable SKU metadata records in document order.
    pub sku_db: Vec<SkuRecord>,
    /// Explicit bounds override, present only when all four values are finite.
    pub bounds: Option<Aabb>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    objects: Value,
    #[serde(default, rename = "skuDB")]
    sku_db: Value,
    #[serde(default)]
    bounds: Value,
}

impl LayoutDocument {
    /// Parse a layout document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Malformed`] for invalid JSON and
    /// [`LoadError::NotAnObject`] when the top level is not an object.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a layout document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotAnObject`] when `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        if !value.is_object() {
            return Err(LoadError::NotAnObject);
        }
        let raw: RawDocument = serde_json::from_value(value)?;

        let objects = match raw.objects {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        let sku_db = match raw.sku_db {
            Value::Array(items) => items.iter().filter_map(parse_sku_record).collect(),
            _ => Vec::new(),
        };

        Ok(Self { objects, sku_db, bounds: parse_bounds(&raw.bounds) })
    }
}

fn parse_sku_record(value: &Value) -> Option<SkuRecord> {
    let rec = RawRecord::new(value);
    let Some(sku) = rec.text_like("sku") else {
        if !value.is_null() {
            warn!(record = %value, "skipping SKU record without a code");
        }
        return None;
    };
    let tags = match value.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| match t {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" "),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    Some(SkuRecord {
        sku,
        name: rec.text_like("name").unwrap_or_default(),
        category: rec.text_like("category").unwrap_or_default(),
        tags,
    })
}

fn parse_bounds(value: &Value) -> Option<Aabb> {
    let get = |key: &str| value.get(key).and_then(coerce_number).filter(|v| v.is_finite());
    Some(Aabb::new(get("minX")?, get("minY")?, get("maxX")?, get("maxY")?))
}

/// Where layout documents come from.
///
/// The engine never performs I/O itself; hosts hand it a source and the
/// engine reports failures as [`LoadError`]s.
pub trait LayoutSource {
    /// Human-readable name of the source for logs.
    fn describe(&self) -> String;

    /// Fetch the raw document text.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when no layout is configured or it cannot be read.
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Layout stored on the local filesystem. A source without a path reports
/// [`LoadError::MissingSource`].
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    path: Option<PathBuf>,
}

impl FileSource {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl LayoutSource for FileSource {
    fn describe(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "<none>".to_owned(), |p| p.display().to_string())
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let path = self.path.as_ref().ok_or(LoadError::MissingSource)?;
        std::fs::read_to_string(path).map_err(|source| LoadError::Read { path: path.display().to_string(), source })
    }
}

/// Layout text held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

impl LayoutSource for InlineSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}
