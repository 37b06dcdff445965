//! The pattern store contract and its bundled implementations.

pub mod fs;
pub mod memory;

pub use fs::FsPatternStore;
pub use memory::InMemoryStore;

use async_trait::async_trait;
use mimic_core::pattern::{AutomationPattern, PageContext};
use mimic_core::similarity::path_similarity;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
    #[error("Pattern not found: {0}")]
    NotFound(String),
}

/// Persistence boundary for automation patterns. Implementations must
/// serialize read-modify-write updates per pattern id so concurrent outcome
/// reports cannot lose counter increments.
#[async_trait]
pub trait PatternStore: Send + Sync {
    async fn get_by_type(&self, message_type: &str)
        -> Result<Vec<AutomationPattern>, StoreError>;

    async fn get_by_context(
        &self,
        context: &PageContext,
    ) -> Result<Vec<AutomationPattern>, StoreError>;

    async fn get_all(&self) -> Result<Vec<AutomationPattern>, StoreError>;

    async fn put(&self, pattern: &AutomationPattern) -> Result<(), StoreError>;

    async fn update_usage(
        &self,
        id: &str,
        usage_count: u32,
        successful_executions: u32,
    ) -> Result<(), StoreError>;

    async fn update_confidence(&self, id: &str, confidence: f64) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Context filter shared by store implementations: same host, paths at least
/// half-overlapping, and structure hashes equal when both sides carry one.
pub fn matches_context(pattern: &AutomationPattern, context: &PageContext) -> bool {
    let pc = &pattern.context;

    if pc.hostname != context.hostname {
        return false;
    }

    if path_similarity(&pc.pathname, &context.pathname) < 0.5 {
        return false;
    }

    match (&pc.structure_hash, &context.structure_hash) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
