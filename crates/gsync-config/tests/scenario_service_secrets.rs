use gsync_config::{
    load_gsync_config_from_strings, resolve_service_secrets_with, ServiceConfig, UnusedKeyPolicy,
};

const YAML: &str = r#"
service:
  base_url: "https://erp.example.com"
  keys_env:
    api_key: "GSYNC_API_KEY"
    api_secret: "GSYNC_API_SECRET"
"#;

fn service() -> ServiceConfig {
    load_gsync_config_from_strings(&[YAML], UnusedKeyPolicy::Fail)
        .unwrap()
        .service()
        .unwrap()
        .clone()
}

#[test]
fn both_halves_resolve_to_token_pair() {
    let secrets = resolve_service_secrets_with(&service(), |name| match name {
        "GSYNC_API_KEY" => Some("key123".to_string()),
        "GSYNC_API_SECRET" => Some("secret456".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(secrets.token_pair(), Some(("key123", "secret456")));
}

#[test]
fn debug_output_is_redacted() {
    let secrets = resolve_service_secrets_with(&service(), |name| Some(format!("value-of-{name}")))
        .unwrap();
    let dbg = format!("{secrets:?}");
    assert!(dbg.contains("<REDACTED>"));
    assert!(!dbg.contains("value-of"));
}

#[test]
fn half_configured_credentials_fail_with_var_name() {
    let err = resolve_service_secrets_with(&service(), |name| {
        (name == "GSYNC_API_KEY").then(|| "key123".to_string())
    })
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("GSYNC_API_SECRET"));
    assert!(!msg.contains("key123"));
}

#[test]
fn no_credentials_means_anonymous() {
    let secrets = resolve_service_secrets_with(&service(), |_| None).unwrap();
    assert!(secrets.token_pair().is_none());
}
