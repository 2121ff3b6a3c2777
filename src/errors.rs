// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Error Types
 * Fatal scan errors and gateway failures with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::time::Duration;
use thiserror::Error;

/// Exit code used for every fatal path
pub const FATAL_EXIT_CODE: i32 = 2;

/// Run-level errors. Every variant terminates the scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Missing or malformed input configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Company name or lookup identifiers could not be obtained
    #[error("Could not resolve company for {domain}: {reason}")]
    IdentityResolution {
        domain: String,
        reason: String,
    },

    /// A candidate producer's gateway call failed
    #[error("Candidate discovery failed for {query}: {source}")]
    CandidateDiscovery {
        query: String,
        #[source]
        source: GatewayError,
    },

    /// A worker or the result sink stopped abnormally
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl ScanError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    pub fn identity(domain: impl Into<String>, reason: impl ToString) -> Self {
        Self::IdentityResolution {
            domain: domain.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of a single external query
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request to {url} failed: {reason}")]
    Http {
        url: String,
        reason: String,
    },

    #[error("Failed to execute {program}: {reason}")]
    Spawn {
        program: String,
        reason: String,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Process {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Query for {target} timed out after {duration:?}")]
    Timeout {
        target: String,
        duration: Duration,
    },
}

impl GatewayError {
    pub fn http(url: &str, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                target: url.to_string(),
                duration: timeout,
            };
        }
        Self::Http {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    /// Whether the failure was a timeout rather than a hard error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scan_error_is_fatal() {
        let errors = vec![
            ScanError::Configuration("missing domain".to_string()),
            ScanError::identity("example.com", "empty company name"),
            ScanError::CandidateDiscovery {
                query: "company/123".to_string(),
                source: GatewayError::Http {
                    url: "https://www.whoxy.com/company/123".to_string(),
                    reason: "connection refused".to_string(),
                },
            },
            ScanError::Pipeline("sink stopped".to_string()),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), FATAL_EXIT_CODE);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::identity("example.com", "empty company name");
        assert_eq!(
            err.to_string(),
            "Could not resolve company for example.com: empty company name"
        );

        let err = GatewayError::Process {
            program: "whois".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "no match".to_string(),
        };
        assert_eq!(err.to_string(), "whois exited with exit status: 1: no match");
        assert!(!err.is_timeout());
    }
}
