// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ScanError;

/// Scan mode selects which discovery channels run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "keyword")]
pub enum ScanMode {
    /// Company-record, email-record and seed-label keyword discovery
    Complete,
    /// Keyword discovery only
    Keyword(String),
}

impl ScanMode {
    /// A non-empty keyword always wins over the complete flag. With neither,
    /// the seed's leftmost label becomes the keyword.
    pub fn select(complete: bool, keyword: &str, seed: &SeedDomain) -> Self {
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            ScanMode::Keyword(keyword.to_string())
        } else if complete {
            ScanMode::Complete
        } else {
            ScanMode::Keyword(seed.label().to_string())
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Complete => "complete",
            ScanMode::Keyword(_) => "keyword",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated seed domain, no scheme prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeedDomain(String);

impl SeedDomain {
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        let domain = raw.trim();

        if domain.is_empty() {
            return Err(ScanError::Configuration(
                "You must specify a domain to use this tool".to_string(),
            ));
        }

        if domain.contains("://") {
            return Err(ScanError::Configuration(format!(
                "Your domain should not contain http:// or https:// (got {})",
                domain
            )));
        }

        if domain.chars().any(char::is_whitespace) {
            return Err(ScanError::Configuration(format!(
                "Domain must not contain whitespace (got {:?})",
                domain
            )));
        }

        Ok(Self(domain.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leftmost dot-separated label, used as the fallback keyword
    pub fn label(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for SeedDomain {
    type Error = ScanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeedDomain> for String {
    fn from(seed: SeedDomain) -> Self {
        seed.0
    }
}

impl fmt::Display for SeedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owning company of the seed domain. Matched verbatim against registration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
}

impl Company {
    /// Returns `None` when the name is empty or whitespace-only.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self { name })
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Opaque company-record or email-record token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupIdentifier(pub String);

impl LookupIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unverified hostname suspected of shared ownership
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateDomain(pub String);

impl CandidateDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate whose registration text contained the company name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifiedDomain(pub String);

impl VerifiedDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CandidateDomain> for VerifiedDomain {
    fn from(candidate: CandidateDomain) -> Self {
        Self(candidate.0)
    }
}

impl fmt::Display for VerifiedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query shape for candidate discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateQuery {
    Company(LookupIdentifier),
    Email(LookupIdentifier),
    Keyword(String),
}

impl CandidateQuery {
    pub fn channel(&self) -> &'static str {
        match self {
            CandidateQuery::Company(_) => "company",
            CandidateQuery::Email(_) => "email",
            CandidateQuery::Keyword(_) => "keyword",
        }
    }

    /// Sorted, deduplicated output is a property of keyword queries only
    pub fn is_sorted_unique(&self) -> bool {
        matches!(self, CandidateQuery::Keyword(_))
    }
}

impl fmt::Display for CandidateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateQuery::Company(id) | CandidateQuery::Email(id) => {
                write!(f, "{} ({})", id, self.channel())
            }
            CandidateQuery::Keyword(keyword) => write!(f, "keyword/{}", keyword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_domain_rejects_scheme() {
        assert!(SeedDomain::parse("http://example.com").is_err());
        assert!(SeedDomain::parse("https://example.com").is_err());
        assert!(SeedDomain::parse("ftp://example.com").is_err());
    }

    #[test]
    fn test_seed_domain_rejects_empty() {
        assert!(SeedDomain::parse("").is_err());
        assert!(SeedDomain::parse("   ").is_err());
        assert!(SeedDomain::parse("exa mple.com").is_err());
    }

    #[test]
    fn test_seed_domain_label() {
        let seed = SeedDomain::parse(" example.co.uk ").unwrap();
        assert_eq!(seed.as_str(), "example.co.uk");
        assert_eq!(seed.label(), "example");

        let bare = SeedDomain::parse("localhost").unwrap();
        assert_eq!(bare.label(), "localhost");
    }

    #[test]
    fn test_company_requires_name() {
        assert!(Company::new("").is_none());
        assert!(Company::new(" \n\t").is_none());

        // Stored exactly as given
        let company = Company::new("Example Corp ").unwrap();
        assert_eq!(company.name, "Example Corp ");
    }

    #[test]
    fn test_scan_mode_selection() {
        let seed = SeedDomain::parse("example.com").unwrap();

        assert_eq!(ScanMode::select(true, "", &seed), ScanMode::Complete);
        assert_eq!(
            ScanMode::select(true, "acme", &seed),
            ScanMode::Keyword("acme".to_string())
        );
        assert_eq!(
            ScanMode::select(false, "acme", &seed),
            ScanMode::Keyword("acme".to_string())
        );
        assert_eq!(
            ScanMode::select(false, "  ", &seed),
            ScanMode::Keyword("example".to_string())
        );
    }

    #[test]
    fn test_candidate_query_display() {
        let query = CandidateQuery::Company(LookupIdentifier("company/42".to_string()));
        assert_eq!(query.to_string(), "company/42 (company)");
        assert!(!query.is_sorted_unique());

        let query = CandidateQuery::Keyword("acme".to_string());
        assert_eq!(query.to_string(), "keyword/acme");
        assert!(query.is_sorted_unique());
    }
}
