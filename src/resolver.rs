// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Company Resolver
 * Resolves the owning company and its lookup identifiers for a seed domain
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::ScanError;
use crate::gateway::Gateway;
use crate::types::{Company, LookupIdentifier, SeedDomain};

pub struct CompanyResolver {
    gateway: Arc<dyn Gateway>,
}

impl CompanyResolver {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Company name gating every ownership decision. Gateway failure and
    /// empty names are both fatal.
    pub async fn resolve(&self, seed: &SeedDomain) -> Result<Company, ScanError> {
        let name = self
            .gateway
            .company_name_for(seed)
            .await
            .map_err(|e| ScanError::identity(seed.as_str(), e))?;

        let company = Company::new(name)
            .ok_or_else(|| ScanError::identity(seed.as_str(), "no company name found"))?;

        info!("Resolved company for {}: {:?}", seed, company.name);
        Ok(company)
    }

    pub async fn company_record_id(
        &self,
        seed: &SeedDomain,
    ) -> Result<Option<LookupIdentifier>, ScanError> {
        let raw = self
            .gateway
            .company_record_id_for(seed)
            .await
            .map_err(|e| ScanError::identity(seed.as_str(), e))?;

        Ok(Self::identifier("company", seed, raw))
    }

    pub async fn email_record_id(
        &self,
        seed: &SeedDomain,
    ) -> Result<Option<LookupIdentifier>, ScanError> {
        let raw = self
            .gateway
            .email_record_id_for(seed)
            .await
            .map_err(|e| ScanError::identity(seed.as_str(), e))?;

        Ok(Self::identifier("email", seed, raw))
    }

    fn identifier(kind: &str, seed: &SeedDomain, raw: String) -> Option<LookupIdentifier> {
        let id = raw.trim();
        if id.is_empty() {
            warn!("No {} record found for {}, skipping that channel", kind, seed);
            return None;
        }
        Some(LookupIdentifier(id.to_string()))
    }
}
