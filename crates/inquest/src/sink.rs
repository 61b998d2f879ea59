//! Durable line-oriented result sink.
//!
//! Each successful answer is written as exactly one line and pushed to stable
//! storage before the next completion is accepted. A crash after K appends
//! leaves exactly K valid lines on disk; only the in-flight record can be
//! lost. Serialization is structural: `append` takes `&mut self`, so two
//! completions can never interleave writes.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::BatchError;

/// Appends successful results to a text file, one flushed line per result.
#[derive(Debug)]
pub struct ResultSink {
    file: File,
    path: PathBuf,
    written: usize,
}

impl ResultSink {
    /// Create (or truncate) the output file for a fresh batch run.
    pub async fn create(path: &Path) -> Result<Self, BatchError> {
        let file = File::create(path).await.map_err(|source| BatchError::Sink {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Persist one result as a single line.
    ///
    /// Embedded line breaks are collapsed to spaces so one logical result
    /// never spans multiple physical lines. The line is flushed and synced
    /// before this returns.
    ///
    /// # Errors
    ///
    /// [`BatchError::Sink`] when the write, flush, or sync fails. Fatal to
    /// the run: a computed result would otherwise be silently lost.
    pub async fn append(&mut self, text: &str) -> Result<(), BatchError> {
        let mut line = normalize_result_text(text);
        line.push('\n');

        self.write_durably(line.as_bytes())
            .await
            .map_err(|source| BatchError::Sink {
                path: self.path.clone(),
                source,
            })?;

        self.written += 1;
        trace!(written = self.written, "result persisted");
        Ok(())
    }

    /// Number of lines persisted so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_durably(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes).await?;
        self.file.flush().await?;
        self.file.sync_data().await
    }
}

/// Collapse embedded line breaks so the result occupies one physical line.
fn normalize_result_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_string()
}
