//! Wires store, selector, adapter and lifecycle together for one automation
//! attempt.

use crate::adapter::ExecutionAdapter;
use crate::config::MimicConfig;
use crate::store::{PatternStore, StoreError};
use mimic_core::lifecycle::{self, PatternAdvice};
use mimic_core::pattern::{AutomationPattern, AutomationRequest, ExecutionResult};
use mimic_core::scorer::PatternMatch;
use mimic_core::selector::PatternSelector;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// What happened to one automation request. Finding nothing replayable is an
/// ordinary outcome; the caller decides the fallback (usually training mode).
#[derive(Debug, Clone)]
pub enum AutomationOutcome {
    NoMatch,
    Executed {
        matched: PatternMatch,
        result: ExecutionResult,
    },
}

pub struct PatternEngine<S, A> {
    store: S,
    adapter: A,
    selector: PatternSelector,
    stale_cutoff_days: f64,
}

impl<S: PatternStore, A: ExecutionAdapter> PatternEngine<S, A> {
    pub fn new(store: S, adapter: A) -> Self {
        Self {
            store,
            adapter,
            selector: PatternSelector::default(),
            stale_cutoff_days: lifecycle::DEFAULT_STALE_DAYS,
        }
    }

    pub fn with_config(store: S, adapter: A, config: &MimicConfig) -> Self {
        Self {
            store,
            adapter,
            selector: PatternSelector::new(
                config.selection.min_score,
                config.selection.execute_threshold,
            ),
            stale_cutoff_days: config.lifecycle.stale_after_days,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Attempt to replay a learned pattern for `request`. On execution the
    /// outcome is folded back into the pattern's counters and persisted
    /// before returning; store failures propagate unchanged.
    pub async fn automate(
        &mut self,
        request: &AutomationRequest,
    ) -> Result<AutomationOutcome, EngineError> {
        let now = unix_now();

        let candidates = self.store.get_by_type(&request.message_type).await?;
        let matches = self.selector.find_matches(request, &candidates, now);

        tracing::debug!(
            message_type = %request.message_type,
            candidates = candidates.len(),
            matches = matches.len(),
            "scored candidates"
        );

        let Some(best) = self.selector.select_best(&matches) else {
            return Ok(AutomationOutcome::NoMatch);
        };

        if !self.selector.is_acceptable(best) {
            tracing::debug!(
                pattern = %best.pattern.id,
                score = best.overall_score,
                "best match rejected by admission gate"
            );
            return Ok(AutomationOutcome::NoMatch);
        }

        let matched = best.clone();
        let result = self.adapter.execute(&matched.pattern, request).await;

        tracing::info!(
            pattern = %matched.pattern.id,
            score = matched.overall_score,
            success = result.success,
            "executed pattern"
        );

        self.record(&matched.pattern, &result).await?;

        Ok(AutomationOutcome::Executed { matched, result })
    }

    /// Store a freshly trained pattern.
    pub async fn learn(&self, pattern: &AutomationPattern) -> Result<(), EngineError> {
        self.store.put(pattern).await?;
        Ok(())
    }

    /// Keep/retrain/delete verdict for a stored pattern.
    pub async fn advise(&self, id: &str) -> Result<PatternAdvice, EngineError> {
        let patterns = self.store.get_all().await?;
        let pattern = patterns
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(lifecycle::recommendation(pattern, unix_now()))
    }

    /// Delete stale or demonstrably unreliable patterns. Returns the number
    /// removed.
    pub async fn cleanup(&self, cutoff_days: Option<f64>) -> Result<usize, EngineError> {
        let cutoff = cutoff_days.unwrap_or(self.stale_cutoff_days);
        let now = unix_now();

        let mut deleted = 0;
        for pattern in self.store.get_all().await? {
            if lifecycle::should_purge(&pattern, now, cutoff) {
                self.store.delete(&pattern.id).await?;
                deleted += 1;
            }
        }

        tracing::info!(deleted, cutoff_days = cutoff, "pattern cleanup finished");
        Ok(deleted)
    }

    async fn record(
        &self,
        pattern: &AutomationPattern,
        result: &ExecutionResult,
    ) -> Result<(), EngineError> {
        let mut updated = pattern.clone();
        lifecycle::record_outcome(&mut updated, result);

        self.store
            .update_usage(
                &updated.id,
                updated.usage_count,
                updated.successful_executions,
            )
            .await?;
        self.store
            .update_confidence(&updated.id, updated.confidence)
            .await?;
        Ok(())
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
