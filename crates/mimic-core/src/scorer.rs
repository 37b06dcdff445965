//! Multi-factor match scoring between a stored pattern and an incoming
//! automation request.

use crate::pattern::{AutomationPattern, AutomationRequest, Payload};
use crate::similarity::{age_penalty, path_similarity, string_similarity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const WEIGHT_PAYLOAD: f64 = 0.35;
const WEIGHT_CONTEXT: f64 = 0.25;
const WEIGHT_RELIABILITY: f64 = 0.25;
const WEIGHT_AGE: f64 = 0.15;

const CONTEXT_WEIGHT_HOSTNAME: f64 = 4.0;
const CONTEXT_WEIGHT_PATHNAME: f64 = 3.0;
const CONTEXT_WEIGHT_STRUCTURE: f64 = 2.0;

/// Discretized verdict gating whether a match may be auto-executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    High,
    Medium,
    Low,
    Risky,
}

/// The scorer's verdict for one (pattern, request) pair. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: AutomationPattern,
    pub confidence: f64,
    pub context_score: f64,
    pub payload_similarity: f64,
    pub overall_score: f64,
    pub recommendation: RecommendationLevel,
}

/// Score `pattern` against `request`. `now` is unix seconds; callers pass
/// wall-clock time, tests pass a fixed instant so results are reproducible.
pub fn evaluate(
    pattern: &AutomationPattern,
    request: &AutomationRequest,
    now: u64,
) -> PatternMatch {
    // Hard filter: the action category must match exactly.
    if pattern.message_type != request.message_type {
        return PatternMatch {
            pattern: pattern.clone(),
            confidence: 0.0,
            context_score: 0.0,
            payload_similarity: 0.0,
            overall_score: 0.0,
            recommendation: RecommendationLevel::Risky,
        };
    }

    let payload_similarity = payload_similarity(&pattern.payload, &request.payload);
    let context_score = context_score(pattern, request);
    let reliability = reliability_score(pattern);
    let age = age_penalty(pattern.age_days(now));

    let overall_score = (WEIGHT_PAYLOAD * payload_similarity
        + WEIGHT_CONTEXT * context_score
        + WEIGHT_RELIABILITY * reliability
        + WEIGHT_AGE * age)
        .clamp(0.0, 1.0);

    let recommendation = recommendation_level(overall_score, pattern.success_rate());

    PatternMatch {
        pattern: pattern.clone(),
        confidence: pattern.confidence.min(overall_score),
        context_score,
        payload_similarity,
        overall_score,
        recommendation,
    }
}

/// Average per-key similarity over the union of keys present in either
/// payload.
fn payload_similarity(a: &Payload, b: &Payload) -> f64 {
    let keys: HashSet<&String> = a.keys().chain(b.keys()).collect();
    if keys.is_empty() {
        return 1.0;
    }

    let mut sum = 0.0;
    for key in &keys {
        sum += match (a.get(*key), b.get(*key)) {
            // Element names must match closely, but a mismatch still earns
            // partial credit: elements are often aliased across recordings.
            (Some(va), Some(vb)) if key.as_str() == "element" => {
                if va == vb {
                    1.0
                } else {
                    0.3
                }
            }
            (Some(serde_json::Value::String(sa)), Some(serde_json::Value::String(sb))) => {
                string_similarity(sa, sb)
            }
            (Some(va), Some(vb)) => {
                if va == vb {
                    1.0
                } else {
                    0.0
                }
            }
            // One-sided keys are suspicious but not disqualifying.
            _ => 0.1,
        };
    }

    (sum / keys.len() as f64).min(1.0)
}

/// Weighted context agreement: hostname 4, pathname 3, structure hash 2.
/// The structure weight only enters the denominator when both sides carry a
/// hash.
fn context_score(pattern: &AutomationPattern, request: &AutomationRequest) -> f64 {
    let pc = &pattern.context;
    let rc = &request.context;

    let mut score = 0.0;
    let mut total = CONTEXT_WEIGHT_HOSTNAME + CONTEXT_WEIGHT_PATHNAME;

    if pc.hostname == rc.hostname {
        score += CONTEXT_WEIGHT_HOSTNAME;
    }

    score += CONTEXT_WEIGHT_PATHNAME * path_similarity(&pc.pathname, &rc.pathname);

    if let (Some(ph), Some(rh)) = (&pc.structure_hash, &rc.structure_hash) {
        total += CONTEXT_WEIGHT_STRUCTURE;
        if ph == rh {
            score += CONTEXT_WEIGHT_STRUCTURE;
        }
    }

    (score / total).clamp(0.0, 1.0)
}

/// Raw confidence blended with observed success rate, with a bonus for
/// well-tested patterns and a discount for untested ones.
fn reliability_score(pattern: &AutomationPattern) -> f64 {
    let mut score = pattern.confidence;

    if pattern.usage_count > 0 {
        score *= 0.5 + 0.5 * pattern.success_rate();
    }

    if pattern.usage_count >= 5 {
        score *= 1.1;
    } else if pattern.usage_count == 0 {
        score *= 0.8;
    }

    score.clamp(0.0, 1.0)
}

fn recommendation_level(overall: f64, success_rate: f64) -> RecommendationLevel {
    if overall >= 0.8 && success_rate >= 0.8 {
        RecommendationLevel::High
    } else if overall >= 0.6 && success_rate >= 0.6 {
        RecommendationLevel::Medium
    } else if overall >= 0.4 && success_rate >= 0.4 {
        RecommendationLevel::Low
    } else {
        RecommendationLevel::Risky
    }
}
