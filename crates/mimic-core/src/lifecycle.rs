//! Pattern lifecycle bookkeeping: outcome recording, staleness, retrain and
//! delete recommendations. Pure computation over provided counters;
//! persistence belongs to the store.

use crate::pattern::{AutomationPattern, ExecutionResult};
use serde::{Deserialize, Serialize};

const CONFIDENCE_MAX: f64 = 2.0;
const CONFIDENCE_FLOOR: f64 = 0.1;
const SUCCESS_REWARD: f64 = 0.05;
// Failures cost twice what a success earns. Caution over recall.
const FAILURE_PENALTY: f64 = 0.1;

pub const DEFAULT_STALE_DAYS: f64 = 30.0;

/// Age-discounted trust bucket for a pattern's track record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityTier {
    High,
    Medium,
    Low,
    Unreliable,
}

/// What to do with a pattern going forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternAdvice {
    Keep,
    Retrain,
    Delete,
}

/// Fold one execution attempt into the pattern's counters and confidence.
pub fn record_outcome(pattern: &mut AutomationPattern, result: &ExecutionResult) {
    pattern.usage_count = pattern.usage_count.saturating_add(1);

    if result.success {
        pattern.successful_executions = pattern.successful_executions.saturating_add(1);
        pattern.confidence = (pattern.confidence + SUCCESS_REWARD).min(CONFIDENCE_MAX);
    } else {
        pattern.confidence = (pattern.confidence - FAILURE_PENALTY).max(CONFIDENCE_FLOOR);
    }
}

pub fn is_stale(pattern: &AutomationPattern, now: u64) -> bool {
    pattern.age_days(now) > DEFAULT_STALE_DAYS
}

/// A pattern needs retraining when it keeps failing, was never exercised and
/// is going cold, or its confidence has eroded.
pub fn should_retrain(pattern: &AutomationPattern, now: u64) -> bool {
    let failing = pattern.usage_count >= 3 && pattern.success_rate() < 0.5;
    let untouched = pattern.age_days(now) > 14.0 && pattern.usage_count == 0;
    let eroded = pattern.confidence < 0.4;

    failing || untouched || eroded
}

pub fn reliability_tier(pattern: &AutomationPattern, now: u64) -> ReliabilityTier {
    let mut score = pattern.confidence * pattern.success_rate();

    let age = pattern.age_days(now);
    if age > 30.0 {
        score *= 0.7;
    } else if age > 7.0 {
        score *= 0.9;
    }

    if score >= 0.8 {
        ReliabilityTier::High
    } else if score >= 0.6 {
        ReliabilityTier::Medium
    } else if score >= 0.4 {
        ReliabilityTier::Low
    } else {
        ReliabilityTier::Unreliable
    }
}

pub fn recommendation(pattern: &AutomationPattern, now: u64) -> PatternAdvice {
    let tier = reliability_tier(pattern, now);

    let proven_bad = pattern.usage_count >= 5 && pattern.success_rate() < 0.3;
    if tier == ReliabilityTier::Unreliable || proven_bad {
        return PatternAdvice::Delete;
    }

    if tier == ReliabilityTier::Low || should_retrain(pattern, now) {
        return PatternAdvice::Retrain;
    }

    PatternAdvice::Keep
}

/// Bulk-cleanup predicate: stale past the cutoff, or a demonstrated low
/// success rate after enough attempts.
pub fn should_purge(pattern: &AutomationPattern, now: u64, cutoff_days: f64) -> bool {
    let stale = pattern.age_days(now) > cutoff_days;
    let low_success = pattern.usage_count > 3 && pattern.success_rate() < 0.3;

    stale || low_success
}
