//! Merging YAML layers into one JSON document, the secret guard, and the
//! config hash.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Prefixes of well-known credential formats.
const SECRET_PREFIXES: &[&str] = &[
    "sk-", "sk_live", "sk_test", "AKIA", "-----BEGIN", "ghp_", "gho_", "glpat-", "xoxb-", "xoxp-",
];

/// Parse and merge `docs` in order; a later layer wins key by key.
pub(crate) fn merge_layers(docs: &[&str]) -> Result<Value> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in docs.iter().enumerate() {
        let layer: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        let layer = serde_json::to_value(layer)
            .with_context(|| format!("layer {i} is not representable as json"))?;
        overlay(&mut merged, layer);
    }
    Ok(merged)
}

/// Mappings merge recursively. An empty layer (`null`) changes nothing;
/// any other value replaces what was there.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Refuse configs that carry a credential instead of an env var name.
pub(crate) fn refuse_secret_literals(doc: &Value) -> Result<()> {
    let mut found = None;
    visit_leaves(doc, "", &mut |pointer, leaf| {
        if found.is_none() && leaf.as_str().is_some_and(looks_like_secret) {
            found = Some(pointer.to_string());
        }
    });
    match found {
        Some(pointer) => bail!("CONFIG_SECRET_DETECTED leaf={pointer} value=REDACTED"),
        None => Ok(()),
    }
}

fn looks_like_secret(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 8 && SECRET_PREFIXES.iter().any(|p| s.starts_with(p))
}

/// Canonical JSON (object keys sorted) and its SHA-256 in hex.
pub(crate) fn canonical_hash(doc: &Value) -> Result<(String, String)> {
    let canonical = serde_json::to_string(doc).context("canonical json serialize failed")?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok((canonical, hex::encode(digest)))
}

/// Call `f` with the JSON pointer of every scalar under `v`.
pub(crate) fn visit_leaves(v: &Value, pointer: &str, f: &mut dyn FnMut(&str, &Value)) {
    match v {
        Value::Object(map) => {
            for (key, child) in map {
                let token = key.replace('~', "~0").replace('/', "~1");
                visit_leaves(child, &format!("{pointer}/{token}"), f);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                visit_leaves(child, &format!("{pointer}/{i}"), f);
            }
        }
        leaf => f(if pointer.is_empty() { "/" } else { pointer }, leaf),
    }
}
