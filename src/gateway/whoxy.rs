// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Whoxy Gateway
 * Registration-record lookups against whoxy.com pages, with liveness
 * probing of candidates and whois-based registration text
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::probe::LivenessProbe;
use super::whois::WhoisLookup;
use super::Gateway;
use crate::config::GatewayConfig;
use crate::errors::GatewayError;
use crate::types::{CandidateQuery, SeedDomain};

static COMPANY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""company_name"\s*:\s*"([^"]*)""#).unwrap()
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Domain links in the result table of company, email and keyword pages
static RESULT_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"td[class="left nowrap"] a[href]"#).unwrap()
});

pub struct WhoxyGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
    probe: LivenessProbe,
    whois: WhoisLookup,
}

impl WhoxyGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let timeout = config.timeout();

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("ownerscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let probe = LivenessProbe::new(timeout, config.probe_concurrency)?;
        let whois = WhoisLookup::new(config.whois_bin.clone(), timeout);

        info!(
            "Whoxy gateway initialized: base_url={}, probe_concurrency={}, timeout={}s, whois={}",
            config.base_url,
            config.probe_concurrency,
            config.timeout_secs,
            whois.program()
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            probe,
            whois,
        })
    }

    async fn fetch_page(&self, path: &str) -> Result<String, GatewayError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::http(&url, e, self.timeout))?;

        // Error pages are parsed like any other page and yield nothing.
        // Only transport failures fail the query.
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} from {}", status.as_u16(), url);
        }

        response
            .text()
            .await
            .map_err(|e| GatewayError::http(&url, e, self.timeout))
    }

    fn candidate_path(query: &CandidateQuery) -> String {
        match query {
            CandidateQuery::Company(id) | CandidateQuery::Email(id) => id.as_str().to_string(),
            CandidateQuery::Keyword(keyword) => format!("keyword/{}", keyword),
        }
    }
}

#[async_trait]
impl Gateway for WhoxyGateway {
    async fn company_name_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        let page = self.fetch_page(domain.as_str()).await?;
        Ok(extract_company_name(&page))
    }

    async fn company_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        let page = self.fetch_page(domain.as_str()).await?;
        Ok(extract_record_id(&page, "company"))
    }

    async fn email_record_id_for(&self, domain: &SeedDomain) -> Result<String, GatewayError> {
        let page = self.fetch_page(domain.as_str()).await?;
        Ok(extract_record_id(&page, "email"))
    }

    async fn candidate_domains_for(&self, query: &CandidateQuery) -> Result<String, GatewayError> {
        let page = self.fetch_page(&Self::candidate_path(query)).await?;
        let hosts = extract_candidate_hosts(&page);
        debug!("{}: {} linked domains before probing", query, hosts.len());

        let live = self.probe.probe(hosts).await;
        Ok(live.join("\n"))
    }

    async fn registration_text_for(&self, domain: &str) -> Result<String, GatewayError> {
        self.whois.lookup(domain).await
    }
}

/// First `"company_name": "<value>"` in the page, trimmed; empty if absent
pub fn extract_company_name(page: &str) -> String {
    COMPANY_NAME_REGEX
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First (sorted) link path containing `<kind>/`; empty if none
pub fn extract_record_id(page: &str, kind: &str) -> String {
    let needle = format!("{}/", kind);
    let document = Html::parse_document(page);

    let ids: BTreeSet<String> = document
        .select(&LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains(&needle))
        .map(|href| strip_relative(href).to_string())
        .filter(|href| !href.is_empty())
        .collect();

    ids.into_iter().next().unwrap_or_default()
}

/// Domain names linked from the result table, in page order
pub fn extract_candidate_hosts(page: &str) -> Vec<String> {
    let document = Html::parse_document(page);

    document
        .select(&RESULT_LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| strip_relative(href).to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

fn strip_relative(href: &str) -> &str {
    let mut href = href.trim();
    while let Some(rest) = href.strip_prefix("../") {
        href = rest;
    }
    href.trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_PAGE: &str = r#"
        <html><body>
        <script>var whois = {"domain_name": "example.com", "company_name": "Example Corp", "country": "US"};</script>
        <a href="../company/8812">Example Corp</a>
        <a href="../email/4410">hostmaster@example.com</a>
        <a href="../company/1001">Other</a>
        <a href="/about">About</a>
        </body></html>
    "#;

    #[test]
    fn test_extract_company_name() {
        assert_eq!(extract_company_name(DOMAIN_PAGE), "Example Corp");
        assert_eq!(extract_company_name(r#""company_name":   "  Padded Inc ","#), "Padded Inc");
        assert_eq!(extract_company_name("<html>nothing here</html>"), "");
    }

    #[test]
    fn test_extract_record_ids() {
        assert_eq!(extract_record_id(DOMAIN_PAGE, "company"), "company/1001");
        assert_eq!(extract_record_id(DOMAIN_PAGE, "email"), "email/4410");
        assert_eq!(extract_record_id("<a href='/x'>x</a>", "email"), "");
    }

    #[test]
    fn test_extract_candidate_hosts() {
        let page = r#"
            <table>
              <tr><td class="left nowrap"><a href="../a.com">a.com</a></td><td>2019</td></tr>
              <tr><td class="left nowrap"><a href="../b.com">b.com</a></td><td>2020</td></tr>
              <tr><td class="left"><a href="../ignored.com">ignored.com</a></td></tr>
            </table>
        "#;

        assert_eq!(extract_candidate_hosts(page), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_candidate_path() {
        use crate::types::LookupIdentifier;

        let query = CandidateQuery::Email(LookupIdentifier("email/4410".to_string()));
        assert_eq!(WhoxyGateway::candidate_path(&query), "email/4410");

        let query = CandidateQuery::Keyword("acme".to_string());
        assert_eq!(WhoxyGateway::candidate_path(&query), "keyword/acme");
    }
}
