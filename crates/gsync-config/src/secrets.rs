//! Runtime secret resolution for the host method API.
//!
//! # Contract
//! - Config YAML stores only **env var NAMES** (e.g. `"GSYNC_API_KEY"`).
//! - Callers resolve once at startup and pass [`ServiceSecrets`] into the
//!   client constructor; no other code reads these env vars.
//! - `Debug` redacts values. Errors name the env var, never the value.
//! - Key and secret are a pair: both set, or both unset (anonymous access).

use anyhow::{bail, Result};

use crate::ServiceConfig;

/// API credentials resolved from the environment.
#[derive(Clone, Default)]
pub struct ServiceSecrets {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl ServiceSecrets {
    /// `(key, secret)` when both halves are present.
    pub fn token_pair(&self) -> Option<(&str, &str)> {
        match (&self.api_key, &self.api_secret) {
            (Some(k), Some(s)) => Some((k.as_str(), s.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ServiceSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSecrets")
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Resolve credentials from the process environment.
pub fn resolve_service_secrets(service: &ServiceConfig) -> Result<ServiceSecrets> {
    resolve_service_secrets_with(service, |name| std::env::var(name).ok())
}

/// Resolve credentials through `lookup` (env var name -> value).
pub fn resolve_service_secrets_with<F>(service: &ServiceConfig, lookup: F) -> Result<ServiceSecrets>
where
    F: Fn(&str) -> Option<String>,
{
    let resolve = |name: &Option<String>| -> Option<String> {
        let name = name.as_deref()?;
        lookup(name).filter(|v| !v.trim().is_empty())
    };

    let api_key = resolve(&service.api_key_env);
    let api_secret = resolve(&service.api_secret_env);

    match (&api_key, &api_secret) {
        (Some(_), None) => bail!(
            "SECRETS_MISSING: env var '{}' (api_secret) is not set or empty",
            service.api_secret_env.as_deref().unwrap_or("<unconfigured>"),
        ),
        (None, Some(_)) => bail!(
            "SECRETS_MISSING: env var '{}' (api_key) is not set or empty",
            service.api_key_env.as_deref().unwrap_or("<unconfigured>"),
        ),
        _ => {}
    }

    Ok(ServiceSecrets {
        api_key,
        api_secret,
    })
}
