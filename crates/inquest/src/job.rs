//! The job seam: the external research-agent collaborator.
//!
//! The engine places no constraint on how a job computes its answer beyond
//! "renderable as text". Anything async that maps a query string to a string
//! (an HTTP agent client, an LLM call, a test stub) plugs in here.

use async_trait::async_trait;

/// Error produced by a job. Opaque to the engine; it is reported per item
/// and never aborts the batch.
pub type JobError = Box<dyn std::error::Error + Send + Sync>;

/// One unit of work: resolve a single query against the external agent.
#[async_trait]
pub trait Job: Send + Sync {
    /// Run the job for one query and produce its textual result.
    async fn run(&self, query: &str) -> Result<String, JobError>;
}

/// Adapter so plain async closures can act as jobs, mostly for tests and
/// small embedders.
pub struct FnJob<F>(pub F);

#[async_trait]
impl<F, Fut> Job for FnJob<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<String, JobError>> + Send,
{
    async fn run(&self, query: &str) -> Result<String, JobError> {
        (self.0)(query.to_string()).await
    }
}
