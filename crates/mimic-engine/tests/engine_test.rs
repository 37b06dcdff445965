use async_trait::async_trait;
use mimic_engine::adapter::ExecutionAdapter;
use mimic_engine::engine::{unix_now, AutomationOutcome, PatternEngine};
use mimic_engine::store::{InMemoryStore, PatternStore};
use mimic_core::lifecycle::PatternAdvice;
use mimic_core::pattern::{AutomationPattern, AutomationRequest, ExecutionResult, PageContext};
use serde_json::json;

const DAY: u64 = 86_400;

struct StubAdapter {
    succeed: bool,
    calls: usize,
}

impl StubAdapter {
    fn new(succeed: bool) -> Self {
        Self { succeed, calls: 0 }
    }
}

#[async_trait]
impl ExecutionAdapter for StubAdapter {
    async fn execute(
        &mut self,
        _pattern: &AutomationPattern,
        _request: &AutomationRequest,
    ) -> ExecutionResult {
        self.calls += 1;
        if self.succeed {
            ExecutionResult::ok(Some(json!({"clicked": true})), unix_now())
        } else {
            ExecutionResult::failed("element not found", unix_now())
        }
    }
}

fn pattern(id: &str, age_days: u64) -> AutomationPattern {
    AutomationPattern {
        id: id.into(),
        message_type: "fill-text".into(),
        payload: [("element".to_string(), json!("email"))].into_iter().collect(),
        selector: "#email".into(),
        context: PageContext::new(
            "chat.example.com",
            "/app",
            unix_now() - age_days * DAY,
        ),
        confidence: 1.0,
        usage_count: 10,
        successful_executions: 9,
    }
}

fn request() -> AutomationRequest {
    AutomationRequest {
        message_type: "fill-text".into(),
        payload: [("element".to_string(), json!("email"))].into_iter().collect(),
        context: PageContext::new("chat.example.com", "/app", unix_now()),
    }
}

async fn store_with(patterns: &[AutomationPattern]) -> InMemoryStore {
    let store = InMemoryStore::new();
    for p in patterns {
        store.put(p).await.unwrap();
    }
    store
}

#[tokio::test]
async fn test_automate_success_updates_counters() {
    let store = store_with(&[pattern("p1", 1)]).await;
    let mut engine = PatternEngine::new(store, StubAdapter::new(true));

    let outcome = engine.automate(&request()).await.unwrap();
    let AutomationOutcome::Executed { matched, result } = outcome else {
        panic!("expected execution");
    };
    assert_eq!(matched.pattern.id, "p1");
    assert!(result.success);

    let all = engine.store().get_all().await.unwrap();
    assert_eq!(all[0].usage_count, 11);
    assert_eq!(all[0].successful_executions, 10);
    assert!((all[0].confidence - 1.05).abs() < 1e-9);
}

#[tokio::test]
async fn test_automate_failure_penalizes_confidence() {
    let store = store_with(&[pattern("p1", 1)]).await;
    let mut engine = PatternEngine::new(store, StubAdapter::new(false));

    let outcome = engine.automate(&request()).await.unwrap();
    let AutomationOutcome::Executed { result, .. } = outcome else {
        panic!("expected execution");
    };
    assert!(!result.success);

    let all = engine.store().get_all().await.unwrap();
    assert_eq!(all[0].usage_count, 11);
    assert_eq!(all[0].successful_executions, 9);
    assert!((all[0].confidence - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn test_automate_no_candidates_is_no_match() {
    let store = store_with(&[]).await;
    let mut engine = PatternEngine::new(store, StubAdapter::new(true));

    let outcome = engine.automate(&request()).await.unwrap();
    assert!(matches!(outcome, AutomationOutcome::NoMatch));
}

#[tokio::test]
async fn test_automate_rejects_unreliable_pattern() {
    // Terrible track record: scores risky, never executed
    let mut bad = pattern("bad", 1);
    bad.confidence = 0.1;
    bad.usage_count = 10;
    bad.successful_executions = 1;

    let store = store_with(&[bad]).await;
    let mut engine = PatternEngine::new(store, StubAdapter::new(true));

    let outcome = engine.automate(&request()).await.unwrap();
    assert!(matches!(outcome, AutomationOutcome::NoMatch));

    // Nothing executed, nothing recorded
    let all = engine.store().get_all().await.unwrap();
    assert_eq!(all[0].usage_count, 10);
}

#[tokio::test]
async fn test_learn_and_advise() {
    let store = store_with(&[]).await;
    let engine = PatternEngine::new(store, StubAdapter::new(true));

    engine.learn(&pattern("fresh", 1)).await.unwrap();
    assert_eq!(engine.advise("fresh").await.unwrap(), PatternAdvice::Keep);

    let mut failing = pattern("failing", 1);
    failing.usage_count = 10;
    failing.successful_executions = 2;
    engine.learn(&failing).await.unwrap();
    assert_eq!(
        engine.advise("failing").await.unwrap(),
        PatternAdvice::Delete
    );
}

#[tokio::test]
async fn test_cleanup_prunes_stale_and_unreliable() {
    let mut low_success = pattern("low-success", 5);
    low_success.usage_count = 4;
    low_success.successful_executions = 1;

    let store = store_with(&[
        pattern("healthy", 5),
        pattern("stale", 45),
        low_success,
    ])
    .await;
    let engine = PatternEngine::new(store, StubAdapter::new(true));

    let deleted = engine.cleanup(None).await.unwrap();
    assert_eq!(deleted, 2);

    let remaining = engine.store().get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "healthy");
}
