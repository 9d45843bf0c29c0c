//! Typed view over the merged config document.
//!
//! ```yaml
//! gst_settings:
//!   enable_overseas_transactions: false
//!   validate_gstin_status: true
//!   enable_sales_through_ecommerce_operators: false
//!   enable_e_waybill_from_pi: false
//!   enable_e_waybill_from_dn: false
//!   enable_e_waybill_from_pr: false
//! service:
//!   base_url: "https://erp.example.com"
//!   timeout_secs: 30
//!   keys_env:
//!     api_key: "GSYNC_API_KEY"
//!     api_secret: "GSYNC_API_SECRET"
//! ```
//!
//! Every section keeps the keys it does not know in `unknown`; those are
//! what the unused-key report lists.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use gsync_schemas::GstSettings;
use serde::Deserialize;
use serde_json::Value;

use crate::layers::visit_leaves;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

type Unknown = BTreeMap<String, Value>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigDoc {
    #[serde(default)]
    gst_settings: Option<GstSection>,
    #[serde(default)]
    service: Option<ServiceSection>,
    #[serde(flatten)]
    unknown: Unknown,
}

/// Flags as the host stores them: booleans, or 0/1 checkboxes.
#[derive(Debug, Default, Deserialize)]
struct GstSection {
    #[serde(default)]
    enable_overseas_transactions: Option<Value>,
    #[serde(default)]
    validate_gstin_status: Option<Value>,
    #[serde(default)]
    enable_sales_through_ecommerce_operators: Option<Value>,
    #[serde(default)]
    enable_e_waybill_from_pi: Option<Value>,
    #[serde(default)]
    enable_e_waybill_from_dn: Option<Value>,
    #[serde(default)]
    enable_e_waybill_from_pr: Option<Value>,
    #[serde(flatten)]
    unknown: Unknown,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceSection {
    #[serde(default)]
    base_url: Option<Value>,
    #[serde(default)]
    timeout_secs: Option<Value>,
    #[serde(default)]
    keys_env: Option<KeysEnvSection>,
    #[serde(flatten)]
    unknown: Unknown,
}

#[derive(Debug, Default, Deserialize)]
struct KeysEnvSection {
    #[serde(default)]
    api_key: Option<Value>,
    #[serde(default)]
    api_secret: Option<Value>,
    #[serde(flatten)]
    unknown: Unknown,
}

/// Where the host's method API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Env var NAME holding the API key.
    pub api_key_env: Option<String>,
    /// Env var NAME holding the API secret.
    pub api_secret_env: Option<String>,
}

impl ConfigDoc {
    pub(crate) fn from_json(doc: &Value) -> Result<Self> {
        Self::deserialize(doc).context("CONFIG_INVALID: unexpected config structure")
    }

    pub(crate) fn gst_settings(&self) -> Result<GstSettings> {
        let Some(s) = &self.gst_settings else {
            return Ok(GstSettings::disabled());
        };
        Ok(GstSettings {
            enable_overseas_transactions: flag(
                "enable_overseas_transactions",
                &s.enable_overseas_transactions,
            )?,
            validate_gstin_status: flag("validate_gstin_status", &s.validate_gstin_status)?,
            enable_sales_through_ecommerce_operators: flag(
                "enable_sales_through_ecommerce_operators",
                &s.enable_sales_through_ecommerce_operators,
            )?,
            enable_e_waybill_from_pi: flag("enable_e_waybill_from_pi", &s.enable_e_waybill_from_pi)?,
            enable_e_waybill_from_dn: flag("enable_e_waybill_from_dn", &s.enable_e_waybill_from_dn)?,
            enable_e_waybill_from_pr: flag("enable_e_waybill_from_pr", &s.enable_e_waybill_from_pr)?,
        })
    }

    /// `None` when the config has no `service` section at all.
    pub(crate) fn service(&self) -> Result<Option<ServiceConfig>> {
        let Some(s) = &self.service else {
            return Ok(None);
        };

        let Some(base_url) = non_empty(&s.base_url) else {
            bail!("CONFIG_MISSING /service/base_url");
        };
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("CONFIG_INVALID /service/base_url: expected http(s) url, got '{base_url}'");
        }

        let timeout_secs = match &s.timeout_secs {
            None => DEFAULT_TIMEOUT_SECS,
            Some(v) => match v.as_u64() {
                Some(n) if n > 0 => n,
                _ => bail!("CONFIG_INVALID /service/timeout_secs: expected positive integer"),
            },
        };

        let keys = s.keys_env.as_ref();
        Ok(Some(ServiceConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            api_key_env: keys.and_then(|k| non_empty(&k.api_key)),
            api_secret_env: keys.and_then(|k| non_empty(&k.api_secret)),
        }))
    }

    /// Leaf pointers of every key no section reads, sorted.
    pub(crate) fn unknown_pointers(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut collect = |prefix: &str, unknown: &Unknown| {
            for (key, value) in unknown {
                let token = key.replace('~', "~0").replace('/', "~1");
                visit_leaves(value, &format!("{prefix}/{token}"), &mut |p, _| {
                    out.push(p.to_string())
                });
            }
        };
        collect("", &self.unknown);
        if let Some(s) = &self.gst_settings {
            collect("/gst_settings", &s.unknown);
        }
        if let Some(s) = &self.service {
            collect("/service", &s.unknown);
            if let Some(k) = &s.keys_env {
                collect("/service/keys_env", &k.unknown);
            }
        }
        out.sort();
        out
    }
}

fn flag(name: &str, value: &Option<Value>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) if n.as_u64() == Some(0) => Ok(false),
        Some(Value::Number(n)) if n.as_u64() == Some(1) => Ok(true),
        Some(other) => bail!("CONFIG_INVALID /gst_settings/{name}: expected boolean, got {other}"),
    }
}

/// Trimmed, non-empty string value.
fn non_empty(value: &Option<Value>) -> Option<String> {
    let s = value.as_ref()?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}
