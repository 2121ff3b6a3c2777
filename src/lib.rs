// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Ownership Scope Library
 * Discovers domains registered to the same company as a seed domain
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod errors;
pub mod types;

// External lookups (registration pages, liveness, whois)
pub mod gateway;

// Discovery and verification pipeline
pub mod pipeline;
pub mod producer;
pub mod resolver;
pub mod sink;
pub mod verifier;

pub use config::{GatewayConfig, ScanConfig};
pub use errors::{GatewayError, ScanError};
pub use pipeline::{ScanPipeline, ScanReport};
