use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use gsync_config::{ServiceConfig, ServiceSecrets};
use gsync_reconcile::{PartyDetailsRequest, ReconcileRequest};
use gsync_schemas::{FieldMap, RegistryEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{GstDetailsService, GstinLookup, PartyDetailsService};

pub const METHOD_GET_GST_DETAILS: &str =
    "india_compliance.gst_india.overrides.transaction.get_gst_details";
pub const METHOD_GET_GSTIN_STATUS: &str =
    "india_compliance.gst_india.doctype.gstin.gstin.get_gstin_status";
pub const METHOD_GET_PARTY_DETAILS: &str =
    "india_compliance.gst_india.overrides.transaction.get_party_details_for_subcontracting";

/// Client for the host's whitelisted-method API
/// (`POST {base}/api/method/{method}`, reply `{"message": ...}`).
///
/// Credentials are resolved by the caller and passed in; never logged.
#[derive(Clone)]
pub struct FrappeClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: Option<String>,
}

impl std::fmt::Debug for FrappeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrappeClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth_header.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl FrappeClient {
    pub fn new(service: &ServiceConfig, secrets: &ServiceSecrets) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()
            .context("http client build failed")?;
        Ok(Self {
            http,
            base_url: service.base_url.trim_end_matches('/').to_string(),
            auth_header: secrets
                .token_pair()
                .map(|(key, secret)| format!("token {key}:{secret}")),
        })
    }

    /// Anonymous client with default timeouts.
    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.base_url, method)
    }

    /// Invoke `method` with a JSON body. `None` when the reply carries no
    /// `message` (or a `null` one).
    pub async fn call_method<A: Serialize + Sync>(
        &self,
        method: &str,
        args: &A,
    ) -> Result<Option<Value>> {
        let mut req = self.http.post(self.method_url(method)).json(args);
        if let Some(auth) = &self.auth_header {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("host method request failed: {method}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .with_context(|| format!("host method response read failed: {method}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "host method error method={} status={} message={}",
                method,
                status.as_u16(),
                error_hint(&text)
            ));
        }

        let body: MethodResponse = serde_json::from_str(&text)
            .with_context(|| format!("host method response json decode failed: {method}"))?;
        debug!(method, has_message = body.message.is_some(), "host method ok");
        Ok(body.message.filter(|m| !m.is_null()))
    }
}

#[derive(Debug, Deserialize)]
struct MethodResponse {
    #[serde(default)]
    message: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    exception: Option<String>,
    #[serde(rename = "_server_messages")]
    server_messages: Option<String>,
}

/// Best human-readable hint from an error reply body.
fn error_hint(text: &str) -> String {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    if let Some(m) = body.server_messages.as_deref().and_then(first_server_message) {
        return m;
    }
    if let Some(e) = body.exception {
        return e;
    }
    "unknown".to_string()
}

/// `_server_messages` is a JSON list of JSON-encoded objects.
fn first_server_message(raw: &str) -> Option<String> {
    let list: Vec<String> = serde_json::from_str(raw).ok()?;
    let first = list.first()?;
    let obj: Value = serde_json::from_str(first).ok()?;
    obj.get("message")?.as_str().map(str::to_string)
}

fn into_field_map(method: &str, message: Option<Value>) -> Result<Option<FieldMap>> {
    match message {
        None => Ok(None),
        Some(v) => {
            let map: FieldMap = serde_json::from_value(v)
                .with_context(|| format!("host method returned a non-object message: {method}"))?;
            Ok(if map.is_empty() { None } else { Some(map) })
        }
    }
}

#[derive(Debug, Serialize)]
struct GstinStatusArgs<'a> {
    gstin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_date: Option<String>,
}

#[async_trait::async_trait]
impl GstDetailsService for FrappeClient {
    async fn fetch_gst_details(&self, req: &ReconcileRequest) -> Result<Option<FieldMap>> {
        let args = req.to_args().context("gst details args encode failed")?;
        let message = self.call_method(METHOD_GET_GST_DETAILS, &args).await?;
        into_field_map(METHOD_GET_GST_DETAILS, message)
    }
}

#[async_trait::async_trait]
impl GstinLookup for FrappeClient {
    async fn fetch_gstin_status(
        &self,
        gstin: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<RegistryEntry>> {
        let args = GstinStatusArgs {
            gstin,
            transaction_date: as_of.map(|d| d.format("%Y-%m-%d").to_string()),
        };
        let Some(message) = self.call_method(METHOD_GET_GSTIN_STATUS, &args).await? else {
            return Ok(None);
        };
        let mut entry: RegistryEntry = serde_json::from_value(message)
            .with_context(|| format!("gstin status decode failed: {gstin}"))?;
        if entry.gstin.is_empty() {
            entry.gstin = gstin.to_string();
        }
        Ok(Some(entry))
    }
}

#[async_trait::async_trait]
impl PartyDetailsService for FrappeClient {
    async fn fetch_party_details(&self, req: &PartyDetailsRequest) -> Result<Option<FieldMap>> {
        let args = req.to_args().context("party details args encode failed")?;
        let message = self.call_method(METHOD_GET_PARTY_DETAILS, &args).await?;
        into_field_map(METHOD_GET_PARTY_DETAILS, message)
    }
}
