// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Ownership Verifier
 * Bounded worker pool confirming candidates against registration text
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::ScanError;
use crate::gateway::Gateway;
use crate::types::{CandidateDomain, Company, VerifiedDomain};

/// Verifier workers for a concurrency budget: half of it, never zero
pub fn pool_size(concurrency: usize) -> usize {
    (concurrency / 2).max(1)
}

/// Literal, case-sensitive substring match. Known to miss suffix and case
/// variants ("Corp" vs "Corporation").
pub fn matches_company(registration_text: &str, company: &Company) -> bool {
    registration_text.contains(&company.name)
}

#[derive(Clone)]
pub struct OwnershipVerifier {
    gateway: Arc<dyn Gateway>,
    company: Arc<Company>,
}

impl OwnershipVerifier {
    pub fn new(gateway: Arc<dyn Gateway>, company: Arc<Company>) -> Self {
        Self { gateway, company }
    }

    /// A failed registration lookup rejects the candidate; it never
    /// propagates past this call.
    pub async fn verify(&self, domain: &CandidateDomain) -> bool {
        match self.gateway.registration_text_for(domain.as_str()).await {
            Ok(text) => matches_company(&text, &self.company),
            Err(e) => {
                debug!("Registration lookup failed for {}: {}", domain, e);
                false
            }
        }
    }
}

/// Per-pool verification counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSummary {
    pub checked: usize,
    pub accepted: usize,
}

/// Fixed-size set of workers pulling candidates from one shared queue
pub struct VerifierPool {
    candidate_tx: mpsc::Sender<CandidateDomain>,
    workers: Vec<JoinHandle<PoolSummary>>,
}

impl VerifierPool {
    pub fn spawn(
        size: usize,
        verifier: OwnershipVerifier,
        results_tx: mpsc::Sender<VerifiedDomain>,
    ) -> Self {
        let size = size.max(1);
        // Capacity 1: a slow pool throttles the producer
        let (candidate_tx, candidate_rx) = mpsc::channel(1);
        let candidate_rx = Arc::new(Mutex::new(candidate_rx));

        let workers = (0..size)
            .map(|worker_id| {
                tokio::spawn(verify_worker(
                    worker_id,
                    Arc::clone(&candidate_rx),
                    verifier.clone(),
                    results_tx.clone(),
                ))
            })
            .collect();

        debug!("Spawned {} verifier workers", size);
        Self {
            candidate_tx,
            workers,
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub async fn submit(&self, candidate: CandidateDomain) -> Result<(), ScanError> {
        self.candidate_tx
            .send(candidate)
            .await
            .map_err(|_| ScanError::Pipeline("verifier workers stopped early".to_string()))
    }

    /// Push every candidate of a producer sequence into the queue
    pub async fn feed<I>(&self, candidates: I) -> Result<usize, ScanError>
    where
        I: IntoIterator<Item = CandidateDomain>,
    {
        let mut fed = 0;
        for candidate in candidates {
            self.submit(candidate).await?;
            fed += 1;
        }
        Ok(fed)
    }

    /// Close the queue and wait for every worker to drain it
    pub async fn finish(self) -> Result<PoolSummary, ScanError> {
        drop(self.candidate_tx);

        let mut summary = PoolSummary::default();
        for worker in self.workers {
            let worker_summary = worker
                .await
                .map_err(|e| ScanError::Pipeline(format!("verifier worker failed: {}", e)))?;
            summary.checked += worker_summary.checked;
            summary.accepted += worker_summary.accepted;
        }

        info!(
            "Verification complete: {}/{} candidates matched",
            summary.accepted, summary.checked
        );
        Ok(summary)
    }
}

async fn verify_worker(
    worker_id: usize,
    candidate_rx: Arc<Mutex<mpsc::Receiver<CandidateDomain>>>,
    verifier: OwnershipVerifier,
    results_tx: mpsc::Sender<VerifiedDomain>,
) -> PoolSummary {
    let mut summary = PoolSummary::default();

    loop {
        let candidate = {
            let mut rx = candidate_rx.lock().await;
            rx.recv().await
        };

        let Some(candidate) = candidate else {
            break;
        };

        summary.checked += 1;
        if verifier.verify(&candidate).await {
            summary.accepted += 1;
            if results_tx.send(candidate.into()).await.is_err() {
                break;
            }
        }
    }

    debug!("Verifier worker {} done: {:?}", worker_id, summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::StaticGateway;

    fn company() -> Arc<Company> {
        Arc::new(Company::new("Example Corp").unwrap())
    }

    fn candidate(name: &str) -> CandidateDomain {
        CandidateDomain(name.to_string())
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(pool_size(0), 1);
        assert_eq!(pool_size(1), 1);
        assert_eq!(pool_size(2), 1);
        assert_eq!(pool_size(3), 1);
        assert_eq!(pool_size(20), 10);
        assert_eq!(pool_size(21), 10);
    }

    #[test]
    fn test_matches_company_is_exact_substring() {
        let company = company();
        let cases = [
            ("Registrant Organization: Example Corp\n", true),
            ("Registrant Organization: Example Corporation", true),
            ("Registrant Organization: EXAMPLE CORP", false),
            ("Registrant Organization: Example  Corp", false),
            ("", false),
        ];

        for (text, expected) in cases {
            assert_eq!(matches_company(text, &company), expected, "text: {:?}", text);
        }
    }

    #[tokio::test]
    async fn test_verify_drops_failed_lookups() {
        let gateway = StaticGateway::new()
            .with_registration("a.com", "Registrant: Example Corp")
            .with_registration("b.com", "Registrant: Someone Else");
        let verifier = OwnershipVerifier::new(Arc::new(gateway), company());

        assert!(verifier.verify(&candidate("a.com")).await);
        assert!(!verifier.verify(&candidate("b.com")).await);
        // No registration text configured: lookup fails
        assert!(!verifier.verify(&candidate("parked.com")).await);
    }

    #[tokio::test]
    async fn test_pool_verifies_all_candidates() {
        let gateway = StaticGateway::new()
            .with_registration("a.com", "Example Corp")
            .with_registration("b.com", "Other Inc")
            .with_registration("c.com", "Example Corp");
        let verifier = OwnershipVerifier::new(Arc::new(gateway), company());

        let (results_tx, mut results_rx) = mpsc::channel::<VerifiedDomain>(1);
        let collector = tokio::spawn(async move {
            let mut out = Vec::new();
            while let Some(domain) = results_rx.recv().await {
                out.push(domain.0);
            }
            out
        });

        let pool = VerifierPool::spawn(pool_size(4), verifier, results_tx);
        assert_eq!(pool.size(), 2);

        let fed = pool
            .feed(["a.com", "b.com", "c.com", "d.com"].into_iter().map(candidate))
            .await
            .unwrap();
        assert_eq!(fed, 4);

        let summary = pool.finish().await.unwrap();
        assert_eq!(summary, PoolSummary { checked: 4, accepted: 2 });

        let mut out = collector.await.unwrap();
        out.sort();
        assert_eq!(out, vec!["a.com", "c.com"]);
    }

    #[tokio::test]
    async fn test_single_worker_pool_does_not_deadlock() {
        let gateway = StaticGateway::new().with_registration("a.com", "Example Corp");
        let verifier = OwnershipVerifier::new(Arc::new(gateway), company());

        let (results_tx, mut results_rx) = mpsc::channel::<VerifiedDomain>(1);
        let pool = VerifierPool::spawn(pool_size(1), verifier, results_tx);
        assert_eq!(pool.size(), 1);

        let collector = tokio::spawn(async move { results_rx.recv().await });
        pool.feed(vec![candidate("a.com")]).await.unwrap();
        pool.finish().await.unwrap();

        assert_eq!(
            collector.await.unwrap(),
            Some(VerifiedDomain("a.com".to_string()))
        );
    }
}
