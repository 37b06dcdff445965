//! Execution boundary: applying a selected pattern against a live page.

use async_trait::async_trait;
use mimic_core::pattern::{AutomationPattern, AutomationRequest, ExecutionResult};

/// Applies a pattern's action (fill, click, ...) to the page the request came
/// from. The engine never touches the DOM itself; failures are reported in
/// the `ExecutionResult`, not as errors, so they feed straight into lifecycle
/// bookkeeping.
#[async_trait]
pub trait ExecutionAdapter: Send + Sync {
    async fn execute(
        &mut self,
        pattern: &AutomationPattern,
        request: &AutomationRequest,
    ) -> ExecutionResult;
}
