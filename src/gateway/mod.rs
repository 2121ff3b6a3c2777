// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Gateway Module
 * External data-access boundary: registration-record pages, liveness
 * probing and whois lookups
 *
 * © 2026 Bountyy Oy
 */

#[doc(hidden)]
pub mod fixture;
pub mod probe;
pub mod whois;
pub mod whoxy;

#[doc(hidden)]
pub use fixture::StaticGateway;
pub use probe::LivenessProbe;
pub use whois::WhoisLookup;
pub use whoxy::WhoxyGateway;

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::types::{CandidateQuery, SeedDomain};

/// Every external query the scan pipeline issues. Each call is a single
/// attempt; the caller decides whether a failure is fatal.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Display name of the company owning `domain`
    async fn company_name_for(&self, domain: &SeedDomain) -> Result<String, GatewayError>;

    /// Company-record identifier for `domain`, empty when none exists
    async fn company_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError>;

    /// Email-record identifier for `domain`, empty when none exists
    async fn email_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError>;

    /// Newline-delimited live hostnames for a record id or keyword
    async fn candidate_domains_for(&self, query: &CandidateQuery) -> Result<String, GatewayError>;

    /// Raw registration (whois) text for `domain`
    async fn registration_text_for(&self, domain: &str) -> Result<String, GatewayError>;
}
