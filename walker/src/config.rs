//! Validated run configuration handed over by the CLI parser.
//!
//! [`WalkerConfig`] is the destination object the argument schema binds
//! into. The enumerations implement
//! [`ParseValue`](hashwalk_args::ParseValue) here, at their declaration
//! site, so the parser can coerce `-a=sha256` and `-f=csv` directly.

use std::path::PathBuf;
use std::time::Duration;

use hashwalk_args::{ConvertError, ParseValue, parse_enum};

/// Digest algorithm applied to every file's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Xxh32,
    Xxh64,
}

impl HashAlgorithm {
    /// Lowercase name used in report headers and accepted on the
    /// command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Xxh32 => "xxh32",
            Self::Xxh64 => "xxh64",
        }
    }
}

impl ParseValue for HashAlgorithm {
    const VALUE_NAME: &'static str = "Algorithm";

    fn parse_value(raw: &str) -> Result<Self, ConvertError> {
        parse_enum(
            raw,
            "Algorithm",
            &[
                ("sha224", Self::Sha224),
                ("sha256", Self::Sha256),
                ("sha384", Self::Sha384),
                ("sha512", Self::Sha512),
                ("xxh32", Self::Xxh32),
                ("xxh64", Self::Xxh64),
            ],
        )
    }
}

/// Shape of the written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Plain,
}

impl ParseValue for ReportFormat {
    const VALUE_NAME: &'static str = "Format";

    fn parse_value(raw: &str) -> Result<Self, ConvertError> {
        parse_enum(
            raw,
            "Format",
            &[
                ("csv", Self::Csv),
                ("json", Self::Json),
                ("plain", Self::Plain),
            ],
        )
    }
}

/// Fully validated configuration for one scan run.
///
/// Field defaults are what an empty command line (apart from the
/// required inputs) produces.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Digest algorithm.
    pub algorithm: HashAlgorithm,
    /// Report output format.
    pub format: ReportFormat,
    /// Folders (or single files) to scan. Required.
    pub inputs: Vec<PathBuf>,
    /// Report destination; stdout when unset.
    pub output: Option<PathBuf>,
    /// Destination for the duplicate-group report; skipped when unset.
    pub duplicates: Option<PathBuf>,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Collect unreadable files into the report instead of aborting.
    pub show_errors: bool,
    /// Skip files smaller than this many bytes.
    pub min_size: u64,
    /// Maximum directory depth below each input; 0 means unlimited.
    pub max_depth: u32,
    /// Only hash files modified within this span.
    pub newer_than: Option<Duration>,
    /// Hashing threads; 0 picks one per core.
    pub jobs: usize,
    /// Help was requested; the shell exits before scanning.
    pub help: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            format: ReportFormat::Csv,
            inputs: Vec::new(),
            output: None,
            duplicates: None,
            follow_symlinks: false,
            show_errors: false,
            min_size: 0,
            max_depth: 0,
            newer_than: None,
            jobs: 0,
            help: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_are_case_insensitive() {
        assert_eq!(
            HashAlgorithm::parse_value("SHA256").unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            HashAlgorithm::parse_value("xxh64").unwrap(),
            HashAlgorithm::Xxh64
        );
    }

    #[test]
    fn test_unknown_algorithm_lists_the_choices() {
        let err = HashAlgorithm::parse_value("crc32").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("crc32"));
        assert!(message.contains("sha256"));
        assert!(message.contains("xxh64"));
    }

    #[test]
    fn test_format_parses() {
        assert_eq!(
            ReportFormat::parse_value("Json").unwrap(),
            ReportFormat::Json
        );
        assert!(ReportFormat::parse_value("xml").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = WalkerConfig::default();
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.format, ReportFormat::Csv);
        assert_eq!(config.min_size, 0);
        assert_eq!(config.max_depth, 0);
        assert!(config.newer_than.is_none());
        assert!(!config.help);
    }
}
