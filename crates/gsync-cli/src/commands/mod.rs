//! Command handlers for gsync-cli.
//!
//! Shared helpers live here; command-specific logic lives in submodules.

pub mod replay;

use anyhow::{anyhow, Context, Result};
use gsync_config::{GsyncConfig, UnusedKeyPolicy};
use gsync_schemas::DocKind;
use serde::de::DeserializeOwned;
use std::fs;
use tracing::warn;

pub fn parse_kind(raw: &str) -> Result<DocKind> {
    DocKind::parse(raw).ok_or_else(|| {
        let expected: Vec<&str> = DocKind::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("invalid --kind '{}'. expected one of: {}", raw, expected.join(" | "))
    })
}

/// Load layered config and warn about keys nothing reads.
pub fn load_config(paths: &[String]) -> Result<GsyncConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let cfg = gsync_config::load_gsync_config(&path_refs, UnusedKeyPolicy::Warn)?;
    for pointer in &cfg.unused_keys {
        warn!(pointer = %pointer, config_hash = %cfg.config_hash, "unused config key");
    }
    Ok(cfg)
}

/// Read a UTF-8 JSON file (a leading BOM is tolerated).
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read failed: {}", path))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    serde_json::from_slice(bytes).with_context(|| format!("invalid JSON: {}", path))
}
