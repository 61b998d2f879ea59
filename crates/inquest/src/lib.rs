//! # Inquest Engine
//!
//! Core machinery for driving many independent research queries against an
//! external agent under a strict concurrency ceiling.
//!
//! The pieces compose as a small pipeline:
//!
//! - [`loader`] reads and shuffles the query file
//! - [`FanOutExecutor`] submits every query at once, bounded by a
//!   [`ConcurrencyGate`], and yields completions as jobs finish
//! - [`ResultSink`] durably appends each successful answer, one line at a time
//! - [`BatchProgress`] renders cumulative progress without backpressuring
//!   completion delivery
//!
//! Completion order is whatever the scheduler yields; submission order has no
//! bearing on it. A failing job never aborts the batch.

use std::path::PathBuf;

use thiserror::Error;

pub mod executor;
pub mod gate;
pub mod job;
pub mod loader;
pub mod progress;
pub mod sink;

pub use executor::{BatchRun, Completion, FanOutExecutor, Query};
pub use gate::ConcurrencyGate;
pub use job::{Job, JobError};
pub use loader::{load_queries, shuffle_queries};
pub use progress::BatchProgress;
pub use sink::ResultSink;

/// Infrastructure error type for batch runs.
///
/// Per-query job failures are not represented here; they are surfaced as
/// failure outcomes on individual [`Completion`]s and never abort the batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The concurrency limit would deadlock (0) and is rejected up front.
    #[error("concurrency limit must be at least 1 (got {0})")]
    InvalidLimit(usize),

    /// The gate's semaphore was closed while a job waited on it.
    #[error("concurrency gate closed")]
    GateClosed,

    /// The query file could not be read.
    #[error("failed to read query file {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A result could not be persisted. Fatal: the computed answer is lost.
    #[error("failed to persist result to {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
