// crates/content-gate-core/src/page.rs
// ============================================================================
// Module: Page Path
// Description: Site-relative page references with traversal protection.
// Purpose: Guarantee that audited pages stay inside the site root.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`PagePath`] is an immutable, site-relative reference to a page under
//! audit. Invariants are enforced at construction: the path must be relative
//! and must not contain parent-directory segments, so a manifest can never
//! direct the checker outside the site root. Paths are resolved against a
//! root only at check time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Page path construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagePathError {
    /// The path is empty.
    #[error("page path must not be empty")]
    Empty,
    /// The path is absolute.
    #[error("page path must be relative: {path}")]
    Absolute {
        /// Offending path.
        path: String,
    },
    /// The path contains parent-directory or other non-normal segments.
    #[error("page path must not contain traversal segments: {path}")]
    Traversal {
        /// Offending path.
        path: String,
    },
}

// ============================================================================
// SECTION: Page Path
// ============================================================================

/// Site-relative reference to a page under audit.
///
/// # Invariants
/// - The stored path is relative.
/// - Every component is a normal segment (no `..`, no `.`, no prefixes).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PagePath {
    /// Validated relative path.
    relative: PathBuf,
}

impl PagePath {
    /// Creates a page path from a relative, traversal-free path.
    ///
    /// # Errors
    ///
    /// Returns [`PagePathError`] when the path is empty, absolute, or
    /// contains non-normal segments.
    pub fn new(relative: impl Into<PathBuf>) -> Result<Self, PagePathError> {
        let relative = relative.into();
        if relative.as_os_str().is_empty() {
            return Err(PagePathError::Empty);
        }
        if relative.is_absolute() {
            return Err(PagePathError::Absolute {
                path: relative.to_string_lossy().into_owned(),
            });
        }
        let normal =
            relative.components().all(|component| matches!(component, Component::Normal(_)));
        if !normal {
            return Err(PagePathError::Traversal {
                path: relative.to_string_lossy().into_owned(),
            });
        }
        Ok(Self {
            relative,
        })
    }

    /// Returns the relative path component.
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Resolves the page path against a site root.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.relative)
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.relative.display())
    }
}

impl TryFrom<String> for PagePath {
    type Error = PagePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PagePath> for String {
    fn from(value: PagePath) -> Self {
        value.relative.to_string_lossy().into_owned()
    }
}
