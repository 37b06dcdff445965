pub mod lifecycle;
pub mod pattern;
pub mod scorer;
pub mod selector;
pub mod similarity;

pub use lifecycle::{PatternAdvice, ReliabilityTier};
pub use pattern::{AutomationPattern, AutomationRequest, ExecutionResult, PageContext, Payload};
pub use scorer::{evaluate, PatternMatch, RecommendationLevel};
pub use selector::PatternSelector;
