//! Command-line argument surface.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a research agent over a batch of queries", long_about = None)]
pub struct Args {
    /// Run this single query and print the answer, bypassing the batch
    /// machinery. Without it, every line of the input file is processed.
    pub query: Option<String>,

    /// File of newline-separated queries for batch mode.
    #[arg(short, long, default_value = "questions.txt")]
    pub input: PathBuf,

    /// Output file for successful answers, one line per answer.
    /// Truncated at the start of each batch run.
    #[arg(short, long, default_value = "results.txt")]
    pub output: PathBuf,

    /// Maximum number of queries in flight at once.
    #[arg(short, long, default_value_t = 50)]
    pub concurrency: usize,

    /// Research-agent service endpoint.
    #[arg(long, default_value = "http://127.0.0.1:8700/v1/research")]
    pub endpoint: String,

    /// Per-query timeout in seconds.
    #[arg(long, default_value_t = 600)]
    pub timeout: u64,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
