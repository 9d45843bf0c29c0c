//! `gsync replay`: drive one editing session against a live host.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use gsync_config::resolve_service_secrets;
use gsync_remote::FrappeClient;
use gsync_runtime::{FormSession, Services};
use gsync_schemas::{GstError, TransactionRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{load_config, read_json};

#[derive(Debug, Deserialize)]
struct FieldEvent {
    field: String,
    #[serde(default)]
    value: Value,
}

pub async fn run(config_paths: &[String], record_path: &str, events_path: &str) -> Result<()> {
    let cfg = load_config(config_paths)?;
    let service = cfg.service()?;
    let secrets = resolve_service_secrets(service)?;
    let client = FrappeClient::new(service, &secrets)?;

    let record: TransactionRecord = read_json(record_path)?;
    let events: Vec<FieldEvent> = read_json(events_path)?;

    let session = FormSession::new(
        record,
        Arc::new(cfg.settings.clone()),
        Services::from_client(client),
    );
    info!(
        session_id = %session.id(),
        doctype = %session.kind(),
        config_hash = %cfg.config_hash,
        events = events.len(),
        "replay start"
    );

    session.onload();
    let mut outcome = session.refresh().await.context("refresh failed");
    if outcome.is_ok() {
        for (i, ev) in events.into_iter().enumerate() {
            outcome = session
                .set_value(&ev.field, ev.value)
                .await
                .with_context(|| format!("event {} ({}) failed", i, ev.field));
            if outcome.is_err() {
                break;
            }
        }
    }

    let stopped = match outcome {
        Ok(()) => None,
        Err(err) => match err.downcast_ref::<GstError>() {
            Some(gst) => {
                println!("error_title={}", gst.title());
                println!("error_message={}", gst.message());
                Some(gst.title().to_string())
            }
            None => return Err(err),
        },
    };

    let record = session.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("serialize record failed")?
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&session.view()).context("serialize view failed")?
    );

    if let Some(title) = stopped {
        bail!("replay stopped: {}", title);
    }
    Ok(())
}
