//! Motivational feedback on saved entries.
//!
//! Provides the [`FeedbackProvider`] trait, a deterministic `local` provider, and an
//! `http` provider that calls an OpenAI-compatible chat-completions endpoint. The
//! provider is created via [`create_provider`] from configuration.

pub mod http;
pub mod local;

use anyhow::Result;
use std::sync::Arc;

use crate::config::FeedbackConfig;
use crate::entries::DailyEntry;

/// Turns an entry into a short encouraging message.
///
/// Methods are synchronous (the `http` provider blocks on the network); callers in
/// async contexts go through [`generate_feedback`].
pub trait FeedbackProvider: Send + Sync {
    fn generate(&self, entry: &DailyEntry) -> Result<String>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Create a feedback provider from config. `none` disables feedback.
pub fn create_provider(config: &FeedbackConfig) -> Result<Option<Arc<dyn FeedbackProvider>>> {
    match config.provider.as_str() {
        "none" => Ok(None),
        "local" => Ok(Some(Arc::new(local::LocalFeedbackProvider))),
        "http" => Ok(Some(Arc::new(http::HttpFeedbackProvider::new(config)?))),
        other => anyhow::bail!("unknown feedback provider: {other}. Supported: local, http, none"),
    }
}

/// Run the provider off the async executor. Failures are logged and yield `None`:
/// a missing message never blocks saving an entry.
pub async fn generate_feedback(
    provider: Option<Arc<dyn FeedbackProvider>>,
    entry: DailyEntry,
) -> Option<String> {
    let provider = provider?;
    let name = provider.name();
    let entry_id = entry.id.clone();

    match tokio::task::spawn_blocking(move || provider.generate(&entry)).await {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            tracing::warn!(provider = name, entry_id = %entry_id, error = %e, "feedback generation failed");
            None
        }
        Err(e) => {
            tracing::warn!(provider = name, entry_id = %entry_id, error = %e, "feedback task panicked");
            None
        }
    }
}
