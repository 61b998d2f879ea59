//! Fan-out executor: submit every query at once, yield results as they finish.
//!
//! Each query becomes one spawned task that acquires the [`ConcurrencyGate`],
//! invokes the job, and drops the permit on the way out. Completions are
//! drained from the underlying [`JoinSet`] in whatever order the scheduler
//! finishes them; submission order is deliberately irrelevant, which keeps
//! the gate saturated instead of head-of-line blocking on a slow query.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{Id, JoinSet};
use tracing::debug;

use crate::gate::ConcurrencyGate;
use crate::job::{Job, JobError};

/// One input query.
///
/// `index` is the position in the original, unshuffled source. It plays no
/// role in scheduling; it exists for debugging and replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub index: usize,
}

impl Query {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }
}

/// A finished job: the query it ran for, and its success or failure.
#[derive(Debug)]
pub struct Completion {
    pub query: Query,
    pub outcome: Result<String, JobError>,
}

/// Submits a batch of queries and streams back completions.
pub struct FanOutExecutor {
    gate: ConcurrencyGate,
}

impl FanOutExecutor {
    pub fn new(gate: ConcurrencyGate) -> Self {
        Self { gate }
    }

    /// The gate bounding this executor's in-flight jobs.
    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Launch every query simultaneously, bounded by the gate.
    ///
    /// All tasks are spawned up front; ones beyond the gate's limit park in
    /// `acquire` until a slot frees. Must be called from within a tokio
    /// runtime.
    pub fn dispatch<J>(&self, queries: Vec<Query>, job: Arc<J>) -> BatchRun
    where
        J: Job + 'static,
    {
        let total = queries.len();
        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(total);

        for query in queries {
            let gate = self.gate.clone();
            let job = Arc::clone(&job);
            let task_query = query.clone();

            let handle = tasks.spawn(async move {
                let _permit = match gate.acquire().await {
                    Ok(permit) => permit,
                    Err(err) => {
                        return Completion {
                            query: task_query,
                            outcome: Err(err.into()),
                        };
                    }
                };
                let outcome = job.run(&task_query.text).await;
                Completion {
                    query: task_query,
                    outcome,
                }
            });
            in_flight.insert(handle.id(), query);
        }

        debug!(total, limit = self.gate.limit(), "batch dispatched");
        BatchRun {
            tasks,
            in_flight,
            total,
        }
    }
}

/// A dispatched batch, drained one completion at a time.
pub struct BatchRun {
    tasks: JoinSet<Completion>,
    /// Task id → query, so a panicked task still reports which query it ran.
    in_flight: HashMap<Id, Query>,
    total: usize,
}

impl BatchRun {
    /// Wait for the next job to finish, in completion order.
    ///
    /// Returns `None` once all jobs have been delivered; an empty batch
    /// yields `None` immediately. A panicked job is returned as a failure
    /// outcome for its query, not as a missing entry.
    pub async fn next(&mut self) -> Option<Completion> {
        match self.tasks.join_next_with_id().await? {
            Ok((id, completion)) => {
                self.in_flight.remove(&id);
                Some(completion)
            }
            Err(join_err) => {
                let query = self.in_flight.remove(&join_err.id()).unwrap_or_default();
                Some(Completion {
                    query,
                    outcome: Err(format!("job task panicked: {join_err}").into()),
                })
            }
        }
    }

    /// Number of queries submitted to this run.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Jobs not yet delivered through [`BatchRun::next`].
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}
