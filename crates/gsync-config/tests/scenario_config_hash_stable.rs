use gsync_config::{load_gsync_config_from_strings, GsyncConfig, UnusedKeyPolicy};

fn load(docs: &[&str]) -> GsyncConfig {
    load_gsync_config_from_strings(docs, UnusedKeyPolicy::Fail).unwrap()
}

const BASE_YAML: &str = r#"
gst_settings:
  validate_gstin_status: true
  enable_overseas_transactions: false
service:
  base_url: "https://erp.example.com"
  keys_env:
    api_key: "GSYNC_API_KEY"
    api_secret: "GSYNC_API_SECRET"
"#;

const BASE_YAML_REORDERED: &str = r#"
service:
  keys_env:
    api_secret: "GSYNC_API_SECRET"
    api_key: "GSYNC_API_KEY"
  base_url: "https://erp.example.com"
gst_settings:
  enable_overseas_transactions: false
  validate_gstin_status: true
"#;

const OVERLAY_YAML: &str = r#"
gst_settings:
  enable_overseas_transactions: true
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load(&[BASE_YAML]);
    let b = load(&[BASE_YAML]);
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load(&[BASE_YAML]);
    let reordered = load(&[BASE_YAML_REORDERED]);
    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
}

#[test]
fn overlay_overrides_base_and_changes_hash() {
    let base = load(&[BASE_YAML]);
    let merged = load(&[BASE_YAML, OVERLAY_YAML]);

    assert_ne!(base.config_hash, merged.config_hash);
    assert!(merged.settings.enable_overseas_transactions);
    // untouched sibling survives the deep merge
    assert!(merged.settings.validate_gstin_status);
    assert_eq!(merged.service().unwrap().base_url, "https://erp.example.com");
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load(&[BASE_YAML]);
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}
