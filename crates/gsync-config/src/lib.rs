//! gsync-config
//!
//! Layered YAML configuration for the GST sync engine.
//!
//! - Documents merge in order: earlier docs are base, later docs override.
//! - The merged document is canonicalized and hashed (SHA-256) so a session
//!   can record exactly which settings it ran with.
//! - Literal secrets are refused; YAML stores env var NAMES only
//!   (see [`secrets`]).
//! - The merged document is read through a typed view (see [`settings`]).
//!   Keys the view does not know, misspellings inside known sections
//!   included, are reported as unused.

mod layers;
pub mod secrets;
pub mod settings;

use std::fs;

use anyhow::{bail, Context, Result};
use gsync_schemas::GstSettings;

pub use secrets::{resolve_service_secrets, resolve_service_secrets_with, ServiceSecrets};
pub use settings::{ServiceConfig, DEFAULT_TIMEOUT_SECS};

use settings::ConfigDoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

/// A validated, hashed configuration.
#[derive(Debug, Clone)]
pub struct GsyncConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub settings: GstSettings,
    /// Leaf pointers nothing reads (sorted). Empty under `UnusedKeyPolicy::Fail`.
    pub unused_keys: Vec<String>,
    service: Option<ServiceConfig>,
}

impl GsyncConfig {
    /// The host API endpoint; required by commands that talk to the host.
    pub fn service(&self) -> Result<&ServiceConfig> {
        match &self.service {
            Some(service) => Ok(service),
            None => bail!("CONFIG_MISSING /service/base_url"),
        }
    }
}

/// Read and load `paths` in merge order.
pub fn load_gsync_config(paths: &[&str], policy: UnusedKeyPolicy) -> Result<GsyncConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}")))
        .collect::<Result<Vec<String>>>()?;
    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_gsync_config_from_strings(&doc_refs, policy)
}

pub fn load_gsync_config_from_strings(
    yaml_docs: &[&str],
    policy: UnusedKeyPolicy,
) -> Result<GsyncConfig> {
    let merged = layers::merge_layers(yaml_docs)?;
    layers::refuse_secret_literals(&merged)?;
    let (canonical_json, config_hash) = layers::canonical_hash(&merged)?;

    let doc = ConfigDoc::from_json(&merged)?;
    let settings = doc.gst_settings()?;
    let service = doc.service()?;
    let unused_keys = doc.unknown_pointers();

    if policy == UnusedKeyPolicy::Fail && !unused_keys.is_empty() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config key(s): {}",
            unused_keys.len(),
            unused_keys.join(", ")
        );
    }

    Ok(GsyncConfig {
        config_hash,
        canonical_json,
        settings,
        unused_keys,
        service,
    })
}
