use mimic_engine::config::{ConfigLoader, MimicConfig};

#[test]
fn test_defaults() {
    let config = MimicConfig::default();
    assert_eq!(config.selection.min_score, 0.3);
    assert_eq!(config.selection.execute_threshold, 0.5);
    assert_eq!(config.lifecycle.stale_after_days, 30.0);
    assert_eq!(config.lifecycle.initial_confidence, 1.0);
}

#[tokio::test]
async fn test_partial_config_fills_defaults() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("mimic.yaml");
    tokio::fs::write(
        &path,
        "selection:\n  min_score: 0.4\nlifecycle:\n  stale_after_days: 14\n",
    )
    .await
    .unwrap();

    let config = ConfigLoader::load_from(&path).await.unwrap();
    assert_eq!(config.selection.min_score, 0.4);
    // Unspecified fields keep their defaults
    assert_eq!(config.selection.execute_threshold, 0.5);
    assert_eq!(config.lifecycle.stale_after_days, 14.0);
    assert_eq!(config.lifecycle.initial_confidence, 1.0);
}

#[tokio::test]
async fn test_invalid_config_is_parse_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("mimic.yaml");
    tokio::fs::write(&path, "selection: [not, a, map]")
        .await
        .unwrap();

    assert!(ConfigLoader::load_from(&path).await.is_err());
}
