//! # Field Tags
//!
//! Builds Go struct tag strings: a `morphe` tag carrying the declared
//! attributes and a `json` tag carrying the cased field name.

use crate::casing::Casing;

/// Builds the tags for one field.
///
/// * `morphe:"a;b"` when `attributes` is non-empty.
/// * `json:"<name>"` when `casing` is not `Casing::None`.
pub fn build_field_tags(field_name: &str, attributes: &[String], casing: Casing) -> Vec<String> {
    let mut tags = Vec::new();
    if !attributes.is_empty() {
        tags.push(format!("morphe:\"{}\"", attributes.join(";")));
    }
    if casing != Casing::None {
        tags.push(format!("json:\"{}\"", casing.apply(field_name)));
    }
    tags
}
