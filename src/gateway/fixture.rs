// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory gateway with canned responses, used by the pipeline tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::Gateway;
use crate::errors::GatewayError;
use crate::types::{CandidateQuery, SeedDomain};

#[derive(Debug, Default)]
pub struct StaticGateway {
    company_names: HashMap<String, String>,
    company_ids: HashMap<String, String>,
    email_ids: HashMap<String, String>,
    candidates: HashMap<String, String>,
    registrations: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, domain: &str, name: &str) -> Self {
        self.company_names.insert(domain.to_string(), name.to_string());
        self
    }

    pub fn with_company_id(mut self, domain: &str, id: &str) -> Self {
        self.company_ids.insert(domain.to_string(), id.to_string());
        self
    }

    pub fn with_email_id(mut self, domain: &str, id: &str) -> Self {
        self.email_ids.insert(domain.to_string(), id.to_string());
        self
    }

    /// `key` is the record id, or `keyword/<kw>` for keyword queries
    pub fn with_candidates(mut self, key: &str, hosts: &[&str]) -> Self {
        self.candidates.insert(key.to_string(), hosts.join("\n"));
        self
    }

    pub fn with_registration(mut self, domain: &str, text: &str) -> Self {
        self.registrations.insert(domain.to_string(), text.to_string());
        self
    }

    /// Make the query logged as `key` fail (see [`StaticGateway::calls`])
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Every query issued so far, e.g. `name:example.com`, `candidates:keyword/acme`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, key: String) -> Result<(), GatewayError> {
        let fail = self.failing.contains(&key);
        self.calls.lock().push(key.clone());

        if fail {
            return Err(GatewayError::Process {
                program: "static".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("{} failed", key),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for StaticGateway {
    async fn company_name_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        self.record(format!("name:{}", domain))?;
        Ok(self.company_names.get(domain.as_str()).cloned().unwrap_or_default())
    }

    async fn company_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        self.record(format!("company_id:{}", domain))?;
        Ok(self.company_ids.get(domain.as_str()).cloned().unwrap_or_default())
    }

    async fn email_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        self.record(format!("email_id:{}", domain))?;
        Ok(self.email_ids.get(domain.as_str()).cloned().unwrap_or_default())
    }

    async fn candidate_domains_for(&self, query: &CandidateQuery) -> Result<String, GatewayError> {
        let key = match query {
            CandidateQuery::Company(id) | CandidateQuery::Email(id) => id.as_str().to_string(),
            CandidateQuery::Keyword(keyword) => format!("keyword/{}", keyword),
        };
        self.record(format!("candidates:{}", key))?;
        Ok(self.candidates.get(&key).cloned().unwrap_or_default())
    }

    async fn registration_text_for(&self, domain: &str) -> Result<String, GatewayError> {
        self.record(format!("whois:{}", domain))?;
        self.registrations
            .get(domain)
            .cloned()
            .ok_or_else(|| GatewayError::Process {
                program: "whois".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("No match for {}", domain),
            })
    }
}
