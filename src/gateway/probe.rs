// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Liveness Probe
 * Keeps only hostnames that answer HTTPS or HTTP
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

const PROBE_SCHEMES: &[&str] = &["https", "http"];

#[derive(Debug, Clone)]
pub struct LivenessProbe {
    client: Client,
    concurrency: usize,
}

impl LivenessProbe {
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self> {
        // Liveness only: any response counts, so certificates and redirects
        // are not followed up on.
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::none())
            .tcp_nodelay(true)
            .build()
            .context("Failed to create probe HTTP client")?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    /// Probe every host concurrently and return the live ones as bare
    /// hostnames, in completion order.
    pub async fn probe(&self, hosts: Vec<String>) -> Vec<String> {
        let total = hosts.len();

        let live: Vec<String> = stream::iter(hosts)
            .map(|host| async move {
                let host = bare_host(&host).to_string();
                if host.is_empty() {
                    return None;
                }
                self.is_live(&host).await.then_some(host)
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|host| async move { host })
            .collect()
            .await;

        info!("Liveness probe: {}/{} hosts answered", live.len(), total);
        live
    }

    async fn is_live(&self, host: &str) -> bool {
        for scheme in PROBE_SCHEMES {
            let url = format!("{}://{}", scheme, host);
            match self.client.get(&url).send().await {
                Ok(response) => {
                    debug!("{} -> {}", url, response.status());
                    return true;
                }
                Err(e) => debug!("{} unreachable: {}", url, e),
            }
        }
        false
    }
}

/// Strip a scheme prefix and trailing slashes
pub fn bare_host(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    raw.trim_end_matches('/')
}
