// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use validator::Validate;

use super::ScanConfig;
use crate::errors::ScanError;
use crate::types::ScanMode;

/// Characters that would end the path segment of `keyword/<kw>`
const KEYWORD_RESERVED: &[char] = &['/', '?', '#'];

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_scan_config(config: &ScanConfig) -> Result<(), ScanError> {
        config
            .validate()
            .map_err(|e| ScanError::Configuration(format!("Configuration validation failed: {}", e)))?;

        Self::validate_base_url(config)?;
        Self::validate_mode(config)?;

        Ok(())
    }

    fn validate_base_url(config: &ScanConfig) -> Result<(), ScanError> {
        let base_url = &config.gateway.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ScanError::Configuration(format!(
                "Base URL must start with http:// or https:// (got {})",
                base_url
            )));
        }

        Ok(())
    }

    /// The keyword becomes one path segment of the keyword page URL
    fn validate_mode(config: &ScanConfig) -> Result<(), ScanError> {
        let keyword = match &config.mode {
            ScanMode::Keyword(keyword) => keyword.as_str(),
            ScanMode::Complete => config.seed.label(),
        };

        if let Some(c) = keyword.chars().find(|c| KEYWORD_RESERVED.contains(c)) {
            return Err(ScanError::Configuration(format!(
                "Keyword must not contain '{}' (got {})",
                c, keyword
            )));
        }

        Ok(())
    }
}
