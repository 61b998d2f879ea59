mod agent;
mod cli;
mod error;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use inquest_engine::{
    BatchProgress, ConcurrencyGate, FanOutExecutor, Job, ResultSink, load_queries, shuffle_queries,
};
use tracing::{Level, error, info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::agent::ResearchAgent;
use crate::cli::Args;
use crate::error::{AppError, Result};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let agent = ResearchAgent::new(&args.endpoint, Duration::from_secs(args.timeout))?;

    match args.query {
        Some(query) => run_single(agent, &query).await,
        None => run_batch(agent, &args).await,
    }
}

/// Single-query mode: one job, no gate, no sink, answer to stdout.
async fn run_single(agent: ResearchAgent, query: &str) -> Result<()> {
    let answer = agent
        .run(query)
        .await
        .map_err(|e| AppError::Job(e.to_string()))?;
    println!("{answer}");
    Ok(())
}

/// Batch mode: every line of the input file, shuffled, under the gate.
async fn run_batch(agent: ResearchAgent, args: &Args) -> Result<()> {
    let gate = ConcurrencyGate::new(args.concurrency)?;

    let mut queries = load_queries(&args.input).await?;
    shuffle_queries(&mut queries);
    info!(
        count = queries.len(),
        concurrency = gate.limit(),
        input = %args.input.display(),
        "starting batch run"
    );

    let mut sink = ResultSink::create(&args.output).await?;
    let executor = FanOutExecutor::new(gate);
    let mut run = executor.dispatch(queries, Arc::new(agent));

    let progress = BatchProgress::new(run.total() as u64);
    let mut failed: usize = 0;

    while let Some(completion) = run.next().await {
        match completion.outcome {
            Ok(answer) => {
                // A sink failure is fatal: the answer would be lost.
                sink.append(&answer).await?;
            }
            Err(e) => {
                failed += 1;
                // Hide the bar while logging so the line is not clobbered
                // by the steady-tick redraw on the same stream.
                progress.suspend(|| {
                    warn!(query = %completion.query.text, error = %e, "query failed");
                });
            }
        }
        progress.completed();
    }
    progress.finish();

    info!(
        completed = sink.written(),
        failed,
        output = %args.output.display(),
        "batch run finished"
    );
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_level(verbose))
        .init();
    Ok(())
}
