//! Ranks scored matches and applies the tiered acceptance policy.

use crate::pattern::{AutomationPattern, AutomationRequest};
use crate::scorer::{evaluate, PatternMatch, RecommendationLevel};

/// Chooses which stored pattern, if any, may be replayed for a request.
#[derive(Debug, Clone)]
pub struct PatternSelector {
    /// Matches at or below this overall score are not considered found.
    pub min_score: f64,
    /// Final admission gate before an adapter is invoked.
    pub execute_threshold: f64,
}

impl Default for PatternSelector {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            execute_threshold: 0.5,
        }
    }
}

impl PatternSelector {
    pub fn new(min_score: f64, execute_threshold: f64) -> Self {
        Self {
            min_score,
            execute_threshold,
        }
    }

    /// Score every candidate of the request's message type and return the
    /// survivors, best first.
    pub fn find_matches(
        &self,
        request: &AutomationRequest,
        candidates: &[AutomationPattern],
        now: u64,
    ) -> Vec<PatternMatch> {
        let mut matches: Vec<PatternMatch> = candidates
            .iter()
            .filter(|p| p.message_type == request.message_type)
            .map(|p| evaluate(p, request, now))
            .filter(|m| m.overall_score > self.min_score)
            .collect();

        matches.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        matches
    }

    /// Tiered pick: first high, else first medium, else a low whose raw score
    /// is exceptional. Risky matches are never selected.
    pub fn select_best<'a>(&self, matches: &'a [PatternMatch]) -> Option<&'a PatternMatch> {
        if let Some(m) = matches
            .iter()
            .find(|m| m.recommendation == RecommendationLevel::High)
        {
            return Some(m);
        }

        if let Some(m) = matches
            .iter()
            .find(|m| m.recommendation == RecommendationLevel::Medium)
        {
            return Some(m);
        }

        matches
            .iter()
            .find(|m| m.recommendation == RecommendationLevel::Low && m.overall_score > 0.8)
    }

    /// Admission gate applied even to the match `select_best` returned.
    pub fn is_acceptable(&self, m: &PatternMatch) -> bool {
        m.recommendation != RecommendationLevel::Risky
            && m.overall_score >= self.execute_threshold
    }
}
