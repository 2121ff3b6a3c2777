// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Candidate Producer
 * Turns a record id or keyword into a stream of live candidate domains
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

use crate::errors::ScanError;
use crate::gateway::Gateway;
use crate::types::{CandidateDomain, CandidateQuery, LookupIdentifier};

pub struct CandidateProducer {
    gateway: Arc<dyn Gateway>,
}

impl CandidateProducer {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn by_company_id(&self, id: LookupIdentifier) -> Result<Candidates, ScanError> {
        self.produce(CandidateQuery::Company(id)).await
    }

    pub async fn by_email_id(&self, id: LookupIdentifier) -> Result<Candidates, ScanError> {
        self.produce(CandidateQuery::Email(id)).await
    }

    pub async fn by_keyword(&self, keyword: &str) -> Result<Candidates, ScanError> {
        self.produce(CandidateQuery::Keyword(keyword.to_string())).await
    }

    /// One gateway call; any failure aborts the run since a truncated list
    /// can't be told apart from a complete one.
    pub async fn produce(&self, query: CandidateQuery) -> Result<Candidates, ScanError> {
        let text = self
            .gateway
            .candidate_domains_for(&query)
            .await
            .map_err(|source| ScanError::CandidateDiscovery {
                query: query.to_string(),
                source,
            })?;

        let candidates = if query.is_sorted_unique() {
            Candidates::sorted_unique(&text)
        } else {
            Candidates::new(text)
        };

        info!("Candidate discovery via {}: {} candidates", query, candidates.remaining());
        Ok(candidates)
    }
}

/// Finite, single-pass sequence of candidates, one per non-blank line
#[derive(Debug)]
pub struct Candidates {
    text: String,
    pos: usize,
}

impl Candidates {
    pub fn new(text: String) -> Self {
        Self { text, pos: 0 }
    }

    pub fn sorted_unique(text: &str) -> Self {
        let unique: BTreeSet<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Self::new(unique.into_iter().collect::<Vec<_>>().join("\n"))
    }

    /// Candidates not yet yielded
    pub fn remaining(&self) -> usize {
        self.text[self.pos..]
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

impl Iterator for Candidates {
    type Item = CandidateDomain;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let (line, consumed) = match rest.find('\n') {
                Some(end) => (&rest[..end], end + 1),
                None => (rest, rest.len()),
            };
            self.pos += consumed;

            let line = line.trim();
            if !line.is_empty() {
                return Some(CandidateDomain(line.to_string()));
            }
        }
        None
    }
}
