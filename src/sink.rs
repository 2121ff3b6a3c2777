// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Result Sink
 * Single aggregator that prints each verified domain once
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::ScanError;
use crate::types::VerifiedDomain;

/// Domains already emitted this run. Grows only.
#[derive(Debug, Default)]
pub struct SeenSet {
    domains: Mutex<HashSet<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic check-and-insert; true if the domain was not seen before
    pub fn insert(&self, domain: &str) -> bool {
        let mut domains = self.domains.lock();
        if domains.contains(domain) {
            return false;
        }
        domains.insert(domain.to_string())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.lock().contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writes first sightings to `out`, one per line
pub struct ResultEmitter<W: Write> {
    seen: Arc<SeenSet>,
    out: W,
    emitted: Vec<VerifiedDomain>,
}

impl<W: Write> ResultEmitter<W> {
    pub fn new(seen: Arc<SeenSet>, out: W) -> Self {
        Self {
            seen,
            out,
            emitted: Vec::new(),
        }
    }

    /// Returns whether the domain was printed
    pub fn accept(&mut self, domain: VerifiedDomain) -> std::io::Result<bool> {
        if !self.seen.insert(domain.as_str()) {
            debug!("Duplicate result ignored: {}", domain);
            return Ok(false);
        }

        writeln!(self.out, "{}", domain)?;
        self.out.flush()?;
        self.emitted.push(domain);
        Ok(true)
    }

    pub fn into_emitted(self) -> Vec<VerifiedDomain> {
        self.emitted
    }
}

/// The only consumer of the results channel
pub struct ResultSink {
    seen: Arc<SeenSet>,
    handle: JoinHandle<Result<Vec<VerifiedDomain>, ScanError>>,
}

impl ResultSink {
    pub fn spawn<W>(mut results_rx: mpsc::Receiver<VerifiedDomain>, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let seen = Arc::new(SeenSet::new());
        let mut emitter = ResultEmitter::new(Arc::clone(&seen), out);

        let handle = tokio::spawn(async move {
            while let Some(domain) = results_rx.recv().await {
                emitter
                    .accept(domain)
                    .map_err(|e| ScanError::Pipeline(format!("failed to write result: {}", e)))?;
            }
            Ok::<_, ScanError>(emitter.into_emitted())
        });

        Self { seen, handle }
    }

    pub fn seen(&self) -> Arc<SeenSet> {
        Arc::clone(&self.seen)
    }

    /// Wait until every sender is dropped and all buffered results are
    /// written. Returns the printed domains in print order.
    pub async fn drain(self) -> Result<Vec<VerifiedDomain>, ScanError> {
        self.handle
            .await
            .map_err(|e| ScanError::Pipeline(format!("result sink failed: {}", e)))?
    }
}
