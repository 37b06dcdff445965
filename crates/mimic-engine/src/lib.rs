pub mod adapter;
pub mod config;
pub mod context;
pub mod engine;
pub mod store;

pub use adapter::ExecutionAdapter;
pub use context::context_from_url;
pub use config::{ConfigError, ConfigLoader, MimicConfig};
pub use engine::{AutomationOutcome, EngineError, PatternEngine};
pub use store::{matches_context, FsPatternStore, InMemoryStore, PatternStore, StoreError};
