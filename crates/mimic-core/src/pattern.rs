use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key/value parameters describing what an action did (element name, value
/// typed, etc.). Values are arbitrary JSON since trainers record whatever the
/// page handed them.
pub type Payload = HashMap<String, serde_json::Value>;

/// The page conditions under which a pattern was captured, or under which a
/// request is being made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    pub hostname: String,
    pub pathname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_hash: Option<String>,
    /// Unix seconds at capture time. Missing in old records; a zero default
    /// scores as maximally aged instead of aborting scoring.
    #[serde(default)]
    pub timestamp: u64,
}

impl PageContext {
    pub fn new(hostname: impl Into<String>, pathname: impl Into<String>, timestamp: u64) -> Self {
        Self {
            hostname: hostname.into(),
            pathname: pathname.into(),
            structure_hash: None,
            timestamp,
        }
    }

    pub fn with_structure_hash(mut self, hash: impl Into<String>) -> Self {
        self.structure_hash = Some(hash.into());
        self
    }
}

/// A previously observed, reusable DOM action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationPattern {
    pub id: String,
    pub message_type: String,
    #[serde(default)]
    pub payload: Payload,
    pub selector: String,
    pub context: PageContext,
    pub confidence: f64,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub successful_executions: u32,
}

impl AutomationPattern {
    /// Observed success rate. Untested patterns count as a clean slate.
    pub fn success_rate(&self) -> f64 {
        if self.usage_count == 0 {
            1.0
        } else {
            f64::from(self.successful_executions) / f64::from(self.usage_count)
        }
    }

    /// Age in days relative to `now` (unix seconds). A future or missing
    /// timestamp never underflows: future capture ages as zero, a zero
    /// timestamp as the full epoch.
    pub fn age_days(&self, now: u64) -> f64 {
        now.saturating_sub(self.context.timestamp) as f64 / 86_400.0
    }
}

/// An incoming ask to perform an action. Ephemeral, one per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRequest {
    pub message_type: String,
    #[serde(default)]
    pub payload: Payload,
    pub context: PageContext,
}

/// Outcome of applying a pattern's action against the live page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: u64,
}

impl ExecutionResult {
    pub fn ok(data: Option<serde_json::Value>, timestamp: u64) -> Self {
        Self {
            success: true,
            data,
            error: None,
            timestamp,
        }
    }

    pub fn failed(message: impl Into<String>, timestamp: u64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp,
        }
    }
}
