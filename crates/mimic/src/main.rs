use async_trait::async_trait;
use clap::{Parser, Subcommand};
use mimic_core::lifecycle;
use mimic_core::pattern::{AutomationPattern, AutomationRequest, ExecutionResult};
use mimic_core::selector::PatternSelector;
use mimic_engine::config::ConfigLoader;
use mimic_engine::context::context_from_url;
use mimic_engine::engine::{unix_now, PatternEngine};
use mimic_engine::store::{FsPatternStore, PatternStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mimic", version, about = "Learned-pattern store maintenance CLI")]
struct Args {
    /// Pattern store directory (defaults to the configured path)
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List stored patterns with their reliability tier
    List {
        /// Only patterns matching this page URL's context
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the keep/retrain/delete verdict for one pattern
    Advise { id: String },
    /// Delete stale or unreliable patterns
    Cleanup {
        /// Staleness cutoff in days
        #[arg(long)]
        days: Option<f64>,
    },
    /// Score a JSON automation request against the store (dry run)
    Rank {
        /// Path to a JSON AutomationRequest
        #[arg(long)]
        request: PathBuf,
    },
    /// Add a pattern from a YAML file to the store
    Learn {
        /// Path to a YAML AutomationPattern
        #[arg(long)]
        file: PathBuf,
    },
}

/// The CLI never touches a live page; engine paths that would execute get a
/// failure result instead.
struct DryRunAdapter;

#[async_trait]
impl mimic_engine::adapter::ExecutionAdapter for DryRunAdapter {
    async fn execute(
        &mut self,
        _pattern: &AutomationPattern,
        _request: &AutomationRequest,
    ) -> ExecutionResult {
        ExecutionResult::failed("no execution adapter wired", unix_now())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load_default().await?;
    let store_path = args.store.unwrap_or(config.store.path.clone());
    let store = FsPatternStore::new(store_path);

    match args.command {
        Cmd::List { url } => {
            let patterns = match url {
                Some(raw) => {
                    let context = context_from_url(&raw, unix_now())?;
                    store.get_by_context(&context).await?
                }
                None => store.get_all().await?,
            };

            let now = unix_now();
            for p in &patterns {
                let tier = lifecycle::reliability_tier(p, now);
                println!(
                    "{}  {}  {:?}  conf={:.2}  used={}  ok={}  host={}",
                    p.id,
                    p.message_type,
                    tier,
                    p.confidence,
                    p.usage_count,
                    p.successful_executions,
                    p.context.hostname,
                );
            }
            println!("{} pattern(s)", patterns.len());
        }

        Cmd::Advise { id } => {
            let engine = PatternEngine::with_config(store, DryRunAdapter, &config);
            let advice = engine.advise(&id).await?;
            println!("{}: {:?}", id, advice);
        }

        Cmd::Cleanup { days } => {
            let engine = PatternEngine::with_config(store, DryRunAdapter, &config);
            let deleted = engine.cleanup(days).await?;
            println!("deleted {} pattern(s)", deleted);
        }

        Cmd::Rank { request } => {
            let content = tokio::fs::read_to_string(&request).await?;
            let request: AutomationRequest = serde_json::from_str(&content)?;

            let candidates = store.get_by_type(&request.message_type).await?;
            let selector = PatternSelector::new(
                config.selection.min_score,
                config.selection.execute_threshold,
            );
            let matches = selector.find_matches(&request, &candidates, unix_now());

            for m in &matches {
                let gate = if selector.is_acceptable(m) { "ok" } else { "gated" };
                println!(
                    "{:.4}  {:?}  {}  payload={:.2}  context={:.2}  [{}]",
                    m.overall_score,
                    m.recommendation,
                    m.pattern.id,
                    m.payload_similarity,
                    m.context_score,
                    gate,
                );
            }

            match selector.select_best(&matches) {
                Some(best) => println!("best: {}", best.pattern.id),
                None => println!("best: none"),
            }
        }

        Cmd::Learn { file } => {
            let content = tokio::fs::read_to_string(&file).await?;
            let pattern: AutomationPattern = serde_yaml::from_str(&content)?;
            let id = pattern.id.clone();

            let engine = PatternEngine::with_config(store, DryRunAdapter, &config);
            engine.learn(&pattern).await?;
            println!("stored {}", id);
        }
    }

    Ok(())
}
