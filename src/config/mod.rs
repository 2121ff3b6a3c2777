// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod validation;

pub use validation::ConfigValidator;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::errors::ScanError;
use crate::types::{ScanMode, SeedDomain};

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_PROBE_CONCURRENCY: usize = 80;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BASE_URL: &str = "https://www.whoxy.com";
pub const DEFAULT_WHOIS_BIN: &str = "whois";

/// Effective configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanConfig {
    pub seed: SeedDomain,

    pub mode: ScanMode,

    /// Total concurrency budget; the verifier pool gets half of it
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[validate(nested)]
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Settings for the registration-data gateway
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewayConfig {
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,

    #[validate(range(min = 1))]
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[validate(length(min = 1))]
    #[serde(default = "default_whois_bin")]
    pub whois_bin: String,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_concurrency: default_probe_concurrency(),
            timeout_secs: default_timeout(),
            whois_bin: default_whois_bin(),
        }
    }
}

impl ScanConfig {
    /// Build and validate a configuration from raw CLI values.
    /// No external query is issued before this succeeds.
    pub fn new(
        domain: &str,
        concurrency: usize,
        complete: bool,
        keyword: &str,
        gateway: GatewayConfig,
    ) -> Result<Self, ScanError> {
        let seed = SeedDomain::parse(domain)?;
        let mode = ScanMode::select(complete, keyword, &seed);

        let config = Self {
            seed,
            mode,
            concurrency,
            gateway,
        };
        ConfigValidator::validate_scan_config(&config)?;

        Ok(config)
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_probe_concurrency() -> usize {
    DEFAULT_PROBE_CONCURRENCY
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_whois_bin() -> String {
    DEFAULT_WHOIS_BIN.to_string()
}
