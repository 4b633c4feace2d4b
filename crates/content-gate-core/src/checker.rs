// crates/content-gate-core/src/checker.rs
// ============================================================================
// Module: Content Existence Checker
// Description: Page existence and required-marker containment checks.
// Purpose: Convert filesystem state into pass/fail audit results.
// Dependencies: crate::manifest, crate::page, crate::report, thiserror
// ============================================================================

//! ## Overview
//! The checker performs two operations: an existence probe that never errors,
//! and a containment check that reads a page as UTF-8 text and requires every
//! configured marker to appear. Reads are size-limited and fail closed: a
//! missing, oversized, or undecodable page is an error, never a pass. Marker
//! misses are reported all at once, in manifest order, so a single run names
//! every gap.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::AuditManifest;
use crate::manifest::PageEntry;
use crate::report::AuditReport;
use crate::report::PageReport;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default hard upper bound on page size in bytes.
pub const DEFAULT_MAX_PAGE_BYTES: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Page check errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `MissingContent` lists every absent marker in manifest order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    /// No regular file exists at the page path.
    #[error("page missing: {}", .path.display())]
    MissingFile {
        /// Resolved page path.
        path: PathBuf,
    },
    /// The page exceeds the configured size limit.
    #[error("page too large: {} ({actual_bytes} > {max_bytes})", .path.display())]
    TooLarge {
        /// Resolved page path.
        path: PathBuf,
        /// Maximum allowed bytes.
        max_bytes: u64,
        /// Actual page size in bytes.
        actual_bytes: u64,
    },
    /// The page could not be read or decoded as UTF-8 text.
    #[error("page read failed: {}: {reason}", .path.display())]
    Read {
        /// Resolved page path.
        path: PathBuf,
        /// Human-readable failure reason.
        reason: String,
    },
    /// The page was read but one or more required markers are absent.
    #[error("required content missing in {}: {}", .path.display(), .missing.join(", "))]
    MissingContent {
        /// Resolved page path.
        path: PathBuf,
        /// Absent markers in manifest order.
        missing: Vec<String>,
    },
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the content checker.
///
/// # Invariants
/// - `max_page_bytes` is enforced before any decode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Hard upper bound on page size in bytes.
    pub max_page_bytes: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_page_bytes: DEFAULT_MAX_PAGE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Content existence checker for static site pages.
///
/// # Invariants
/// - `exists` has no side effects and never errors.
/// - `contains_all` is deterministic for unchanged content.
pub struct ContentChecker {
    /// Checker configuration, including the page size limit.
    config: CheckerConfig,
}

impl ContentChecker {
    /// Creates a new checker with the given configuration.
    #[must_use]
    pub const fn new(config: CheckerConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns true when a regular file exists at the path.
    #[must_use]
    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Checks that every required marker appears in the page text.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] when the page is missing, oversized, unreadable,
    /// not valid UTF-8, or lacks one or more markers.
    pub fn contains_all(&self, path: &Path, required: &[String]) -> Result<(), CheckError> {
        let text = self.read_page(path)?;
        let missing = missing_markers(&text, required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckError::MissingContent {
                path: path.to_path_buf(),
                missing,
            })
        }
    }

    /// Checks a single manifest entry and reports the outcome.
    #[must_use]
    pub fn check_page(&self, root: &Path, entry: &PageEntry) -> PageReport {
        let path = entry.path.resolve(root);
        match self.contains_all(&path, &entry.required) {
            Ok(()) => PageReport::pass(entry.path.to_string()),
            Err(CheckError::MissingContent {
                missing, ..
            }) => PageReport::fail_missing(entry.path.to_string(), missing),
            Err(err) => PageReport::fail_error(entry.path.to_string(), err.to_string()),
        }
    }

    /// Runs every page check in the manifest and aggregates the results.
    #[must_use]
    pub fn run_audit(&self, root: &Path, manifest: &AuditManifest) -> AuditReport {
        let pages: Vec<PageReport> =
            manifest.pages.iter().map(|entry| self.check_page(root, entry)).collect();
        AuditReport::new(pages)
    }

    /// Reads a page as UTF-8 text, enforcing the size limit before decode.
    fn read_page(&self, path: &Path) -> Result<String, CheckError> {
        if !path.is_file() {
            return Err(CheckError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let metadata = fs::metadata(path).map_err(|err| CheckError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        if metadata.len() > self.config.max_page_bytes {
            return Err(CheckError::TooLarge {
                path: path.to_path_buf(),
                max_bytes: self.config.max_page_bytes,
                actual_bytes: metadata.len(),
            });
        }
        let bytes = fs::read(path).map_err(|err| CheckError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|_| CheckError::Read {
            path: path.to_path_buf(),
            reason: "invalid utf-8".to_string(),
        })
    }
}

impl Default for ContentChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

// ============================================================================
// SECTION: Containment
// ============================================================================

/// Returns the markers absent from the text, preserving input order.
#[must_use]
pub fn missing_markers(text: &str, required: &[String]) -> Vec<String> {
    required.iter().filter(|marker| !text.contains(marker.as_str())).cloned().collect()
}
