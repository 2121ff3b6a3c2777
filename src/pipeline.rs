// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Pipeline
 * Resolve company -> discover candidates -> verify ownership -> print once
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::errors::ScanError;
use crate::gateway::Gateway;
use crate::producer::CandidateProducer;
use crate::resolver::CompanyResolver;
use crate::sink::ResultSink;
use crate::types::{Company, ScanMode, VerifiedDomain};
use crate::verifier::{pool_size, OwnershipVerifier, PoolSummary, VerifierPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Init,
    ResolveCompany,
    CompleteScan,
    KeywordScan,
    Drain,
    Done,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Init => "init",
            ScanPhase::ResolveCompany => "resolve-company",
            ScanPhase::CompleteScan => "complete-scan",
            ScanPhase::KeywordScan => "keyword-scan",
            ScanPhase::Drain => "drain",
            ScanPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub company: Company,
    pub mode: ScanMode,
    /// Printed domains, in print order
    pub domains: Vec<VerifiedDomain>,
    pub checked: usize,
}

pub struct ScanPipeline {
    config: ScanConfig,
    resolver: CompanyResolver,
    producer: CandidateProducer,
    gateway: Arc<dyn Gateway>,
}

impl ScanPipeline {
    pub fn new(config: ScanConfig, gateway: Arc<dyn Gateway>) -> Self {
        debug!("[{}] seed={} mode={}", ScanPhase::Init, config.seed, config.mode);

        Self {
            resolver: CompanyResolver::new(Arc::clone(&gateway)),
            producer: CandidateProducer::new(Arc::clone(&gateway)),
            gateway,
            config,
        }
    }

    /// Run the whole scan, writing verified domains to `out` as they
    /// complete. Any error is fatal for the run.
    pub async fn run<W>(&self, out: W) -> Result<ScanReport, ScanError>
    where
        W: Write + Send + 'static,
    {
        let started = Instant::now();

        debug!("[{}] {}", ScanPhase::ResolveCompany, self.config.seed);
        let company = self.resolver.resolve(&self.config.seed).await?;

        // Capacity 1: a slow sink throttles the verifiers
        let (results_tx, results_rx) = mpsc::channel(1);
        let sink = ResultSink::spawn(results_rx, out);

        let verifier = OwnershipVerifier::new(Arc::clone(&self.gateway), Arc::new(company.clone()));

        let summary = match &self.config.mode {
            ScanMode::Complete => self.complete_scan(&verifier, results_tx).await?,
            ScanMode::Keyword(keyword) => self.keyword_scan(keyword, &verifier, results_tx).await?,
        };

        debug!("[{}] waiting for result sink", ScanPhase::Drain);
        let domains = sink.drain().await?;

        info!(
            "[{}] {} owned domains for {:?} ({} candidates checked) in {:.1}s",
            ScanPhase::Done,
            domains.len(),
            company.name,
            summary.checked,
            started.elapsed().as_secs_f64()
        );

        Ok(ScanReport {
            company,
            mode: self.config.mode.clone(),
            domains,
            checked: summary.checked,
        })
    }

    /// Company-record and email-record candidates share one pool, then the
    /// seed label runs as a keyword scan.
    async fn complete_scan(
        &self,
        verifier: &OwnershipVerifier,
        results_tx: mpsc::Sender<VerifiedDomain>,
    ) -> Result<PoolSummary, ScanError> {
        let seed = &self.config.seed;
        info!("[{}] {}", ScanPhase::CompleteScan, seed);

        let pool = VerifierPool::spawn(
            pool_size(self.config.concurrency),
            verifier.clone(),
            results_tx.clone(),
        );

        if let Some(id) = self.resolver.company_record_id(seed).await? {
            let candidates = self.producer.by_company_id(id).await?;
            pool.feed(candidates).await?;
        }

        if let Some(id) = self.resolver.email_record_id(seed).await? {
            let candidates = self.producer.by_email_id(id).await?;
            pool.feed(candidates).await?;
        }

        let record_summary = pool.finish().await?;
        let keyword_summary = self.keyword_scan(seed.label(), verifier, results_tx).await?;

        Ok(PoolSummary {
            checked: record_summary.checked + keyword_summary.checked,
            accepted: record_summary.accepted + keyword_summary.accepted,
        })
    }

    /// Consumes the last results sender; the results channel closes once
    /// this pool's workers exit.
    async fn keyword_scan(
        &self,
        keyword: &str,
        verifier: &OwnershipVerifier,
        results_tx: mpsc::Sender<VerifiedDomain>,
    ) -> Result<PoolSummary, ScanError> {
        info!("[{}] keyword={}", ScanPhase::KeywordScan, keyword);

        let candidates = self.producer.by_keyword(keyword).await?;

        let pool = VerifierPool::spawn(pool_size(self.config.concurrency), verifier.clone(), results_tx);
        pool.feed(candidates).await?;
        pool.finish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::gateway::StaticGateway;

    fn config(complete: bool, keyword: &str) -> ScanConfig {
        ScanConfig::new("example.com", 4, complete, keyword, GatewayConfig::default()).unwrap()
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(ScanPhase::ResolveCompany.to_string(), "resolve-company");
        assert_eq!(ScanPhase::Done.to_string(), "done");
    }

    #[tokio::test]
    async fn test_complete_scan_queries_in_order() {
        let gateway = Arc::new(
            StaticGateway::new()
                .with_company("example.com", "Example Corp")
                .with_company_id("example.com", "company/1")
                .with_email_id("example.com", "email/2"),
        );
        let pipeline = ScanPipeline::new(config(true, ""), gateway.clone());

        let report = pipeline.run(std::io::sink()).await.unwrap();
        assert!(report.domains.is_empty());
        assert_eq!(report.mode, ScanMode::Complete);

        assert_eq!(
            gateway.calls(),
            vec![
                "name:example.com",
                "company_id:example.com",
                "candidates:company/1",
                "email_id:example.com",
                "candidates:email/2",
                "candidates:keyword/example",
            ]
        );
    }

    #[tokio::test]
    async fn test_complete_scan_skips_missing_records() {
        let gateway = Arc::new(
            StaticGateway::new()
                .with_company("example.com", "Example Corp")
                .with_candidates("keyword/example", &["example.net"])
                .with_registration("example.net", "Registrant Organization: Example Corp"),
        );
        let pipeline = ScanPipeline::new(config(true, ""), gateway.clone());

        let report = pipeline.run(std::io::sink()).await.unwrap();
        assert_eq!(report.domains, vec![VerifiedDomain("example.net".to_string())]);
        assert_eq!(report.checked, 1);
        assert!(!gateway.calls().iter().any(|c| c.starts_with("candidates:company")));
    }

    #[tokio::test]
    async fn test_keyword_override_skips_record_channels() {
        let gateway = Arc::new(
            StaticGateway::new()
                .with_company("example.com", "Example Corp")
                .with_company_id("example.com", "company/1"),
        );
        let pipeline = ScanPipeline::new(config(true, "acme"), gateway.clone());

        pipeline.run(std::io::sink()).await.unwrap();
        assert_eq!(
            gateway.calls(),
            vec!["name:example.com", "candidates:keyword/acme"]
        );
    }
}
