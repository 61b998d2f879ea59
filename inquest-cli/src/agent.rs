//! HTTP client for the external research-agent service.
//!
//! This is the collaborator boundary: one POST per query, the response body
//! is the answer text. How the agent plans, searches, or phrases its answer
//! is the service's business, not ours.

use std::time::Duration;

use async_trait::async_trait;
use inquest_engine::{Job, JobError};
use tracing::debug;

use crate::error::AppError;

/// Job implementation that resolves queries against a remote agent endpoint.
pub struct ResearchAgent {
    client: reqwest::Client,
    endpoint: String,
}

impl ResearchAgent {
    /// Build an agent client with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn ask(&self, query: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?;

        let answer = response.text().await?;
        debug!(bytes = answer.len(), "agent answered");
        Ok(answer)
    }
}

#[async_trait]
impl Job for ResearchAgent {
    async fn run(&self, query: &str) -> Result<String, JobError> {
        Ok(self.ask(query).await?)
    }
}
