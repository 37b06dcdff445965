use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MimicConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mimic")
        .join("patterns")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_execute_threshold")]
    pub execute_threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            execute_threshold: default_execute_threshold(),
        }
    }
}

fn default_min_score() -> f64 {
    0.3
}

fn default_execute_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: f64,
    #[serde(default = "default_initial_confidence")]
    pub initial_confidence: f64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            stale_after_days: default_stale_after_days(),
            initial_confidence: default_initial_confidence(),
        }
    }
}

fn default_stale_after_days() -> f64 {
    30.0
}

fn default_initial_confidence() -> f64 {
    1.0
}
