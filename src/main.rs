// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Ownerscope - Related Domain Discovery
 * Finds live domains registered to the same company as a seed domain
 *
 * (c) 2026 Bountyy Oy
 */

use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ownerscope::config::{
    GatewayConfig, ScanConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_PROBE_CONCURRENCY,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WHOIS_BIN,
};
use ownerscope::errors::ScanError;
use ownerscope::gateway::WhoxyGateway;
use ownerscope::pipeline::ScanPipeline;

/// Ownerscope - discover domains owned by the same company
#[derive(Parser, Debug)]
#[command(name = "ownerscope")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Find live domains registered to the same company as a seed domain", long_about = None)]
struct Cli {
    /// Domain to start the scan from (no http:// or https://)
    #[arg(short = 'd', long = "domain", env = "OWNERSCOPE_DOMAIN", default_value = "")]
    domain: String,

    /// Concurrency level; half of it goes to ownership verification
    #[arg(short = 'c', long, env = "OWNERSCOPE_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Complete scan mode: company record, email record and keyword discovery
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    complete: bool,

    /// Only search domains containing this keyword (overrides --complete)
    #[arg(long, env = "OWNERSCOPE_KEYWORD", default_value = "")]
    keyword: String,

    /// Timeout in seconds for every external query
    #[arg(long, env = "OWNERSCOPE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Parallel liveness probes per candidate listing
    #[arg(long, env = "OWNERSCOPE_PROBE_CONCURRENCY", default_value_t = DEFAULT_PROBE_CONCURRENCY)]
    probe_concurrency: usize,

    /// whois client used for registration text
    #[arg(long, env = "OWNERSCOPE_WHOIS_BIN", default_value = DEFAULT_WHOIS_BIN)]
    whois_bin: String,

    /// Registration-data site
    #[arg(long, env = "OWNERSCOPE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    fn scan_config(&self) -> Result<ScanConfig, ScanError> {
        let gateway = GatewayConfig {
            base_url: self.base_url.clone(),
            probe_concurrency: self.probe_concurrency,
            timeout_secs: self.timeout,
            whois_bin: self.whois_bin.clone(),
        };

        ScanConfig::new(
            &self.domain,
            self.concurrency,
            self.complete,
            &self.keyword,
            gateway,
        )
    }
}

fn main() {
    let cli = Cli::parse();

    // stdout carries results only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .init();

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            report_fatal(&e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<(), ScanError> {
    let config = cli.scan_config()?;

    if let Ok(json) = serde_json::to_string(&config) {
        debug!("Effective configuration: {}", json);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("ownerscope-worker")
        .enable_all()
        .build()
        .map_err(|e| ScanError::Pipeline(format!("Failed to start runtime: {}", e)))?;

    let result = runtime.block_on(async move {
        let gateway = WhoxyGateway::new(&config.gateway)
            .map_err(|e| ScanError::Configuration(format!("{:#}", e)))?;

        let pipeline = ScanPipeline::new(config, Arc::new(gateway));
        let report = pipeline.run(std::io::stdout()).await?;

        info!(
            "Found {} domains owned by {:?}",
            report.domains.len(),
            report.company.name
        );
        Ok::<(), ScanError>(())
    });

    // Fatal paths exit without waiting on in-flight lookups
    runtime.shutdown_background();
    result
}

fn report_fatal(err: &ScanError) {
    if std::io::stderr().is_terminal() {
        eprintln!("\x1b[31m[!] {}\x1b[0m", err);
    } else {
        eprintln!("[!] {}", err);
    }
}
