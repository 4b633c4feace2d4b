// crates/content-gate-core/src/manifest.rs
// ============================================================================
// Module: Audit Manifest
// Description: TOML manifest describing pages and their required markers.
// Purpose: Load and validate audit configuration before any page is read.
// Dependencies: crate::page, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The audit manifest lists every page under audit together with the markers
//! that must appear in it. Loading is fail-closed: the file is size-limited,
//! unknown fields are rejected, and validation refuses manifests that gate
//! nothing (no pages, or a page with no markers). Page paths are validated by
//! [`PagePath`] during deserialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::page::PagePath;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a manifest file in bytes.
pub const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

/// Maximum size of a single required marker in bytes.
pub const MAX_MARKER_BYTES: usize = 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Manifest load and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest I/O error.
    #[error("manifest io error: {}: {reason}", .path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Human-readable failure reason.
        reason: String,
    },
    /// Manifest exceeds the size limit.
    #[error("manifest too large: {} ({actual_bytes} > {max_bytes})", .path.display())]
    TooLarge {
        /// Manifest path.
        path: PathBuf,
        /// Maximum allowed bytes.
        max_bytes: u64,
        /// Actual manifest size in bytes.
        actual_bytes: u64,
    },
    /// Manifest is not valid TOML for the expected shape.
    #[error("manifest parse error: {}: {reason}", .path.display())]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Human-readable failure reason.
        reason: String,
    },
    /// Manifest parsed but fails validation rules.
    #[error("manifest invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// A single page entry: the page and its required markers.
///
/// # Invariants
/// - `required` is non-empty and ordered; order is preserved in reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    /// Site-relative page path.
    pub path: PagePath,
    /// Ordered markers that must all appear in the page text.
    pub required: Vec<String>,
}

/// Audit manifest describing the site under audit.
///
/// # Invariants
/// - `pages` is non-empty after validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditManifest {
    /// Optional site root, resolved relative to the manifest directory.
    pub root: Option<PathBuf>,
    /// Pages under audit.
    pub pages: Vec<PageEntry>,
}

impl AuditManifest {
    /// Loads and validates a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the file cannot be read, exceeds the
    /// size limit, fails to parse, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let metadata = fs::metadata(path).map_err(|err| ManifestError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        if metadata.len() > MAX_MANIFEST_BYTES {
            return Err(ManifestError::TooLarge {
                path: path.to_path_buf(),
                max_bytes: MAX_MANIFEST_BYTES,
                actual_bytes: metadata.len(),
            });
        }
        let text = fs::read_to_string(path).map_err(|err| ManifestError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let manifest: Self = toml::from_str(&text).map_err(|err| ManifestError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validates manifest contents against the fail-closed rules.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Invalid`] when the manifest gates nothing or
    /// carries empty or oversized markers.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.pages.is_empty() {
            return Err(ManifestError::Invalid("manifest must list at least one page".to_string()));
        }
        for entry in &self.pages {
            if entry.required.is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "page {} must require at least one marker",
                    entry.path
                )));
            }
            for marker in &entry.required {
                if marker.is_empty() {
                    return Err(ManifestError::Invalid(format!(
                        "page {} has an empty marker",
                        entry.path
                    )));
                }
                if marker.len() > MAX_MARKER_BYTES {
                    return Err(ManifestError::Invalid(format!(
                        "page {} has a marker exceeding {MAX_MARKER_BYTES} bytes",
                        entry.path
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolves the effective site root against the manifest directory.
    ///
    /// An absolute `root` is used as-is; a relative `root` is joined onto the
    /// manifest directory; a missing `root` means the manifest directory.
    #[must_use]
    pub fn site_root(&self, manifest_dir: &Path) -> PathBuf {
        match &self.root {
            None => manifest_dir.to_path_buf(),
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => manifest_dir.join(root),
        }
    }
}
