//! Raw layout record → [`SceneObject`] normalization.
//!
//! Layout files in the wild disagree on two conventions, and both are
//! resolved here by fixed rules rather than by guessing a single format:
//!
//! - **Anchor**: if the record carries `cx` or `cy`, or says
//!   `"anchor": "center"`, its position is the rectangle center and the
//!   top-left corner is derived as `center - size / 2`. Otherwise `x, y` is
//!   the top-left corner and the center is derived as `x, y + size / 2`.
//! - **Rotation**: `rot` is radians unless its magnitude exceeds a full turn,
//!   in which case it is degrees (see [`normalize_rotation`]).
//!
//! Normalization never fails. Missing or non-numeric fields coerce to zero,
//! so a malformed record degrades to a zero-sized object at the origin.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::Value;

use crate::doc::{SceneObject, Shape, SkuRef, WALL_KIND};
use crate::geometry::{Aabb, Point, normalize_rotation, rotated_rect_aabb};
use crate::search::{SkuTable, build_search_text};

/// Coerce a JSON value to a number the way loosely-typed layout files expect.
///
/// Numbers pass through, numeric strings are parsed (an empty string is 0),
/// booleans are 0/1. Anything else, including `null`, yields `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            match trimmed.parse::<f64>() {
                Ok(v) if !v.is_nan() => Some(v),
                _ => None,
            }
        }
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Typed access to the fields of one raw layout record.
pub struct RawRecord<'a> {
    value: &'a Value,
}

impl<'a> RawRecord<'a> {
    /// Wrap a reference to a raw record for typed access.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Whether the key is present at all (even with a `null` value).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.value.get(key).is_some()
    }

    /// Numeric field coerced with [`coerce_number`]; `None` when absent or unusable.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.value.get(key).and_then(coerce_number).filter(|v| v.is_finite())
    }

    /// Numeric field, defaulting to `0.0`.
    #[must_use]
    pub fn number_or_zero(&self, key: &str) -> f64 {
        self.number(key).unwrap_or(0.0)
    }

    /// String field. Empty strings count as absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// String or number field rendered as text. Empty strings count as absent.
    #[must_use]
    pub fn text_like(&self, key: &str) -> Option<String> {
        match self.value.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Type tag; empty when absent.
    #[must_use]
    pub fn kind(&self) -> &'a str {
        self.value.get("type").and_then(Value::as_str).unwrap_or("")
    }

    /// Whether the record positions itself by its center.
    #[must_use]
    pub fn is_center_anchored(&self) -> bool {
        self.has("cx") || self.has("cy") || self.text("anchor") == Some("center")
    }

    /// Assigned SKU codes: `skuQty` keys first, then `skus` entries, without duplicates.
    #[must_use]
    pub fn sku_refs(&self) -> Vec<SkuRef> {
        let mut refs: Vec<SkuRef> = Vec::new();
        let mut push = |code: String, qty: Option<f64>| {
            if !refs.iter().any(|r| r.code == code) {
                refs.push(SkuRef { code, qty });
            }
        };
        if let Some(Value::Object(qty)) = self.value.get("skuQty") {
            for (code, amount) in qty {
                push(code.clone(), coerce_number(amount));
            }
        }
        if let Some(Value::Array(codes)) = self.value.get("skus") {
            for code in codes {
                match code {
                    Value::String(s) => push(s.clone(), None),
                    Value::Number(n) => push(n.to_string(), None),
                    _ => {}
                }
            }
        }
        refs
    }
}

/// Normalize one raw record. Records without an `id` get a generated one.
#[must_use]
pub fn normalize_object(raw: &Value, skus: &SkuTable) -> SceneObject {
    let rec = RawRecord::new(raw);
    let kind = rec.kind();
    let id = rec
        .text_like("id")
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let (shape, center, rotation, aabb) = if kind == WALL_KIND {
        wall_geometry(&rec)
    } else {
        rect_geometry(&rec)
    };

    let label = rec.text_like("label");
    let sku_refs = rec.sku_refs();
    let search_text = build_search_text(label.as_deref(), &sku_refs, skus);

    SceneObject {
        id,
        kind: kind.to_owned(),
        layer: rec.text_like("layer"),
        shape,
        center,
        rotation,
        aabb,
        color: rec.text("color").map(str::to_owned),
        label,
        label_size: rec.number("labelSize"),
        skus: sku_refs,
        search_text,
    }
}

fn wall_geometry(rec: &RawRecord<'_>) -> (Shape, Point, f64, Aabb) {
    let a = Point::new(rec.number_or_zero("x1"), rec.number_or_zero("y1"));
    let b = Point::new(rec.number_or_zero("x2"), rec.number_or_zero("y2"));
    (Shape::Wall { a, b }, a.midpoint(b), 0.0, Aabb::from_points(a, b))
}

fn rect_geometry(rec: &RawRecord<'_>) -> (Shape, Point, f64, Aabb) {
    let rotation = normalize_rotation(rec.number_or_zero("rot"));
    let w = rec.number_or_zero("w");
    let h = rec.number_or_zero("h");

    let (x, y, center) = if rec.is_center_anchored() {
        let cx = rec.number("cx").or_else(|| rec.number("x")).unwrap_or(0.0);
        let cy = rec.number("cy").or_else(|| rec.number("y")).unwrap_or(0.0);
        (cx - w * 0.5, cy - h * 0.5, Point::new(cx, cy))
    } else {
        let x = rec.number_or_zero("x");
        let y = rec.number_or_zero("y");
        (x, y, Point::new(x + w * 0.5, y + h * 0.5))
    };

    (Shape::Rect { x, y, w, h }, center, rotation, rotated_rect_aabb(x, y, w, h, rotation))
}
