//! Feedback from an OpenAI-compatible chat-completions endpoint.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use super::FeedbackProvider;
use crate::config::FeedbackConfig;
use crate::entries::DailyEntry;

const SYSTEM_PROMPT: &str = "You are a warm, practical coach. Reply with two or three \
     sentences of encouragement about the user's day. Mention money or stress only if \
     the numbers call for it. No lists, no headings.";

const MAX_TOKENS: u32 = 120;

pub struct HttpFeedbackProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl HttpFeedbackProvider {
    pub fn new(config: &FeedbackConfig) -> Result<Self> {
        anyhow::ensure!(
            !config.endpoint.trim().is_empty(),
            "feedback.endpoint is required for the http provider"
        );

        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(var = %config.api_key_env, "no API key set for feedback endpoint");
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    fn request_body(&self, entry: &DailyEntry) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": describe_entry(entry)},
            ],
        })
    }
}

impl FeedbackProvider for HttpFeedbackProvider {
    fn generate(&self, entry: &DailyEntry) -> Result<String> {
        // Built per call: a blocking client must not be dropped on an async worker.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to build HTTP client")?;

        let mut request = client.post(&self.endpoint).json(&self.request_body(entry));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .with_context(|| format!("feedback request to {} failed", self.endpoint))?;
        anyhow::ensure!(
            response.status().is_success(),
            "feedback endpoint returned HTTP {}",
            response.status()
        );

        let body: ChatResponse = response.json().context("malformed feedback response")?;
        first_message(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

fn first_message(body: ChatResponse) -> Result<String> {
    let text = body
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();
    anyhow::ensure!(!text.is_empty(), "feedback response had no content");
    Ok(text)
}

/// Plain-text rendering of an entry for the prompt.
pub(crate) fn describe_entry(entry: &DailyEntry) -> String {
    let mut lines = vec![
        format!("Date: {}", entry.entry_date),
        format!("Income: {} (side income {})", entry.income_today, entry.side_income),
        format!("Bills due: {}", entry.bills_due_today),
        format!("Food: {}, gas: {}", entry.food_spent, entry.gas_spent),
        format!("Net for the day: {}", entry.net_income()),
        format!("Hours worked: {}", entry.hours_worked),
        format!("Stress (1-10): {}", entry.stress_level),
    ];
    if let Some(debts) = entry.debts_total {
        lines.push(format!("Total debts: {debts}"));
    }
    if let Some(priority) = &entry.priority {
        lines.push(format!("Top priority: {priority}"));
    }
    if let Some(notes) = &entry.notes {
        lines.push(format!("Notes: {notes}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::EntryInput;
    use rust_decimal_macros::dec;

    #[test]
    fn test_describe_entry_includes_net_and_notes() {
        let entry = DailyEntry::sample(
            "2024-05-01",
            EntryInput {
                income_today: dec!(150),
                gas_spent: dec!(20),
                stress_level: 7,
                notes: Some("car trouble".into()),
                ..Default::default()
            },
        );
        let text = describe_entry(&entry);
        assert!(text.contains("Date: 2024-05-01"));
        assert!(text.contains("Net for the day: 130"));
        assert!(text.contains("Stress (1-10): 7"));
        assert!(text.contains("Notes: car trouble"));
        assert!(!text.contains("Top priority"));
    }

    #[test]
    fn test_request_body_shape() {
        let provider = HttpFeedbackProvider::new(&FeedbackConfig::default()).unwrap();
        let body = provider.request_body(&DailyEntry::sample("2024-05-01", EntryInput::default()));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_first_message_parsing() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Keep going!  "}}]}"#,
        )
        .unwrap();
        assert_eq!(first_message(body).unwrap(), "Keep going!");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_message(empty).is_err());
    }

    #[test]
    fn test_blank_endpoint_rejected() {
        let config = FeedbackConfig {
            endpoint: " ".into(),
            ..Default::default()
        };
        assert!(HttpFeedbackProvider::new(&config).is_err());
    }
}
