//! File-backed pattern store: one YAML file per pattern id.

use super::{matches_context, PatternStore, StoreError};
use async_trait::async_trait;
use mimic_core::pattern::{AutomationPattern, PageContext};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::fs;

pub struct FsPatternStore {
    base_path: PathBuf,
    // One async mutex per pattern id keeps read-modify-write updates
    // serialized; the outer std mutex only guards the map itself.
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FsPatternStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mimic")
            .join("patterns")
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    fn lock_for(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(id.to_string()).or_default().clone()
    }

    async fn read_pattern(&self, id: &str) -> Result<AutomationPattern, StoreError> {
        let path = self.file_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path).await?;
        Ok(serde_yaml::from_str(&content)?)
    }

    async fn write_pattern(&self, pattern: &AutomationPattern) -> Result<(), StoreError> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).await?;
        }
        let yaml = serde_yaml::to_string(pattern)?;
        fs::write(self.file_path(&pattern.id), yaml).await?;
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<AutomationPattern>, StoreError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut patterns = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml::from_str::<AutomationPattern>(&content) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    // One malformed record must not abort the whole query.
                    tracing::warn!(file = %path.display(), error = %e, "skipping malformed pattern");
                }
            }
        }

        Ok(patterns)
    }
}

#[async_trait]
impl PatternStore for FsPatternStore {
    async fn get_by_type(
        &self,
        message_type: &str,
    ) -> Result<Vec<AutomationPattern>, StoreError> {
        let mut patterns = self.load_all().await?;
        patterns.retain(|p| p.message_type == message_type);
        Ok(patterns)
    }

    async fn get_by_context(
        &self,
        context: &PageContext,
    ) -> Result<Vec<AutomationPattern>, StoreError> {
        let mut patterns = self.load_all().await?;
        patterns.retain(|p| matches_context(p, context));
        Ok(patterns)
    }

    async fn get_all(&self) -> Result<Vec<AutomationPattern>, StoreError> {
        self.load_all().await
    }

    async fn put(&self, pattern: &AutomationPattern) -> Result<(), StoreError> {
        let lock = self.lock_for(&pattern.id);
        let _guard = lock.lock().await;
        self.write_pattern(pattern).await
    }

    async fn update_usage(
        &self,
        id: &str,
        usage_count: u32,
        successful_executions: u32,
    ) -> Result<(), StoreError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut pattern = self.read_pattern(id).await?;
        pattern.usage_count = usage_count;
        pattern.successful_executions = successful_executions;
        self.write_pattern(&pattern).await
    }

    async fn update_confidence(&self, id: &str, confidence: f64) -> Result<(), StoreError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut pattern = self.read_pattern(id).await?;
        pattern.confidence = confidence;
        self.write_pattern(&pattern).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let path = self.file_path(id);
        if path.exists() {
            fs::remove_file(path).await?;
        }

        // Drop the lock entry with the file so the map stays bounded by the
        // number of live patterns. In-flight holders keep their Arc alive.
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.remove(id);
        Ok(())
    }
}
