//! In-memory pattern store, mainly for tests and ephemeral sessions.

use super::{matches_context, PatternStore, StoreError};
use async_trait::async_trait;
use mimic_core::pattern::{AutomationPattern, PageContext};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryStore {
    patterns: Mutex<HashMap<String, AutomationPattern>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatternStore for InMemoryStore {
    async fn get_by_type(
        &self,
        message_type: &str,
    ) -> Result<Vec<AutomationPattern>, StoreError> {
        let patterns = self.patterns.lock().await;
        Ok(patterns
            .values()
            .filter(|p| p.message_type == message_type)
            .cloned()
            .collect())
    }

    async fn get_by_context(
        &self,
        context: &PageContext,
    ) -> Result<Vec<AutomationPattern>, StoreError> {
        let patterns = self.patterns.lock().await;
        Ok(patterns
            .values()
            .filter(|p| matches_context(p, context))
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<AutomationPattern>, StoreError> {
        let patterns = self.patterns.lock().await;
        Ok(patterns.values().cloned().collect())
    }

    async fn put(&self, pattern: &AutomationPattern) -> Result<(), StoreError> {
        let mut patterns = self.patterns.lock().await;
        patterns.insert(pattern.id.clone(), pattern.clone());
        Ok(())
    }

    async fn update_usage(
        &self,
        id: &str,
        usage_count: u32,
        successful_executions: u32,
    ) -> Result<(), StoreError> {
        let mut patterns = self.patterns.lock().await;
        let pattern = patterns
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        pattern.usage_count = usage_count;
        pattern.successful_executions = successful_executions;
        Ok(())
    }

    async fn update_confidence(&self, id: &str, confidence: f64) -> Result<(), StoreError> {
        let mut patterns = self.patterns.lock().await;
        let pattern = patterns
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        pattern.confidence = confidence;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut patterns = self.patterns.lock().await;
        patterns.remove(id);
        Ok(())
    }
}
