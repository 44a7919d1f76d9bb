//! File walking, digest computation, and report writing.
//!
//! This crate is the collaborator behind the `hashwalk` binary: it takes
//! a fully validated [`WalkerConfig`] (populated by the argument parser
//! in `hashwalk-args`), expands the configured folders into a file list,
//! hashes every file on a thread pool, and writes the results as CSV,
//! JSON, or plain text, optionally together with a report of files
//! sharing a digest.
//!
//! # Example
//!
//! ```no_run
//! use hashwalk_walker::{WalkerConfig, render_report, walk};
//!
//! let config = WalkerConfig {
//!     inputs: vec!["/data".into()],
//!     ..WalkerConfig::default()
//! };
//! let report = walk(&config)?;
//! println!("{}", render_report(&report, &config)?);
//! # Ok::<(), hashwalk_walker::WalkError>(())
//! ```

mod config;
mod digest;
mod error;
mod report;
mod walk;

pub use config::{HashAlgorithm, ReportFormat, WalkerConfig};
pub use digest::hash_file;
pub use error::{Result, WalkError};
pub use report::{duplicate_groups, render_report, write_duplicates, write_report};
pub use walk::{FileRecord, ScanReport, walk};
