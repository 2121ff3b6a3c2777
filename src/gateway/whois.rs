// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::errors::GatewayError;

/// Registration text retrieval through the system whois client
#[derive(Debug, Clone)]
pub struct WhoisLookup {
    program: String,
    timeout: Duration,
}

impl WhoisLookup {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run `<program> <domain>` and return its stdout.
    /// Non-zero exit is an error even when some output was produced.
    pub async fn lookup(&self, domain: &str) -> Result<String, GatewayError> {
        debug!("Executing: {} {}", self.program, domain);

        let child = Command::new(&self.program)
            .arg(domain)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(GatewayError::Spawn {
                    program: self.program.clone(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(GatewayError::Timeout {
                    target: domain.to_string(),
                    duration: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(GatewayError::Process {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
