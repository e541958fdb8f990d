mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use hashkit_core::hashing::AlgorithmInfo;
use hashkit_core::{HashAlgorithm, HashResult, digest_matches};
use serde::Serialize;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// One rendered digest, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashReport {
    /// File path, or `"text"` for string input
    pub source: String,
    pub algorithm: HashAlgorithm,
    /// Digest in the requested letter case
    pub hash: String,
    pub size: u64,
    pub processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
}

impl HashReport {
    /// Build a report from a hash result and its rendered digest
    pub fn new(source: impl Into<String>, result: &HashResult, hash: String) -> Self {
        Self {
            source: source.into(),
            algorithm: result.algorithm,
            hash,
            size: result.input_size,
            processing_time_ms: result.duration.as_millis() as u64,
            expected: None,
            matched: None,
        }
    }

    /// Compare against an expected digest
    pub fn with_expected(mut self, expected: Option<String>) -> Self {
        if let Some(expected) = expected {
            self.matched = Some(digest_matches(&self.hash, &expected));
            self.expected = Some(expected);
        }
        self
    }

    /// False only when an expected digest was given and differs
    pub fn is_match(&self) -> bool {
        self.matched.unwrap_or(true)
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single digest
    fn format_hash(&self, report: &HashReport) -> Result<String>;

    /// Format the list of available algorithms and converters
    fn format_listing(&self, algorithms: &[AlgorithmInfo]) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
