//! Directory walking and record collection.
//!
//! Expands the configured input folders into a flat file list, applies
//! the size and age filters, then hashes the survivors on a rayon pool.
//! Per-file failures abort the run unless the configuration asks for
//! them to be collected instead.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::WalkerConfig;
use crate::digest::hash_file;
use crate::error::{Result, WalkError};

/// One hashed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    pub digest: String,
}

/// Everything one scan run produced.
///
/// `errors` is only populated when the configuration collects failures
/// instead of aborting on them.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub records: Vec<FileRecord>,
    pub errors: Vec<String>,
}

struct Candidate {
    path: PathBuf,
    size: u64,
    modified: Option<SystemTime>,
}

/// Walks every configured input and returns the hashed records sorted by
/// path.
pub fn walk(config: &WalkerConfig) -> Result<ScanReport> {
    let cutoff = config
        .newer_than
        .and_then(|span| SystemTime::now().checked_sub(span));

    let mut errors = Vec::new();
    let mut candidates = Vec::new();
    for root in &config.inputs {
        collect(root, config, cutoff, &mut candidates, &mut errors)?;
    }
    tracing::debug!(files = candidates.len(), "collected scan candidates");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .map_err(|err| WalkError::ThreadPool(err.to_string()))?;

    let algorithm = config.algorithm;
    let hashed: Vec<std::result::Result<FileRecord, (PathBuf, std::io::Error)>> =
        pool.install(|| {
            candidates
                .par_iter()
                .map(|candidate| {
                    hash_file(&candidate.path, algorithm)
                        .map(|digest| FileRecord {
                            path: candidate.path.clone(),
                            size: candidate.size,
                            modified: candidate.modified.map(DateTime::<Local>::from),
                            digest,
                        })
                        .map_err(|err| (candidate.path.clone(), err))
                })
                .collect()
        });

    let mut records = Vec::with_capacity(hashed.len());
    for outcome in hashed {
        match outcome {
            Ok(record) => records.push(record),
            Err((path, source)) => {
                if config.show_errors {
                    tracing::warn!(path = %path.display(), error = %source, "skipping unreadable file");
                    errors.push(format!("{}: {source}", path.display()));
                } else {
                    return Err(WalkError::Access { path, source });
                }
            }
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(ScanReport { records, errors })
}

/// Walks one input root, pushing files that pass the filters.
fn collect(
    root: &Path,
    config: &WalkerConfig,
    cutoff: Option<SystemTime>,
    candidates: &mut Vec<Candidate>,
    errors: &mut Vec<String>,
) -> Result<()> {
    let mut walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    if config.max_depth > 0 {
        walker = walker.max_depth(config.max_depth as usize);
    }

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if config.show_errors {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    errors.push(err.to_string());
                    continue;
                }
                return Err(WalkError::Walk(err));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                if config.show_errors {
                    tracing::warn!(path = %entry.path().display(), error = %err, "skipping entry without metadata");
                    errors.push(format!("{}: {err}", entry.path().display()));
                    continue;
                }
                return Err(WalkError::Walk(err));
            }
        };

        let size = metadata.len();
        if size < config.min_size {
            continue;
        }
        let modified = metadata.modified().ok();
        if let Some(cutoff) = cutoff {
            match modified {
                Some(stamp) if stamp >= cutoff => {}
                _ => continue,
            }
        }

        candidates.push(Candidate {
            path: entry.into_path(),
            size,
            modified,
        });
    }
    Ok(())
}
