// crates/content-gate-core/src/report.rs
// ============================================================================
// Module: Audit Reports
// Description: Serializable per-page and aggregate audit results.
// Purpose: Carry pass/fail outcomes and missing markers to callers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Report types are plain serializable values. A page report names the page,
//! its status, the markers that were absent (in manifest order), and an
//! optional error string for pages that could not be read at all. The audit
//! report aggregates page reports and an overall pass flag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Page Report
// ============================================================================

/// Outcome of a single page check.
///
/// # Invariants
/// - Variants are stable and exhaustive for check outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Every required marker was found.
    Pass,
    /// The page was missing, unreadable, or lacked markers.
    Fail,
}

/// Report for a single page check.
///
/// # Invariants
/// - `missing` preserves manifest order.
/// - `error` is set only for pages that could not be read or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// Site-relative page path.
    pub path: String,
    /// Check outcome.
    pub status: PageStatus,
    /// Markers absent from the page, in manifest order.
    pub missing: Vec<String>,
    /// Read or decode failure, when the page could not be checked.
    pub error: Option<String>,
}

impl PageReport {
    /// Builds a passing report.
    #[must_use]
    pub const fn pass(path: String) -> Self {
        Self {
            path,
            status: PageStatus::Pass,
            missing: Vec::new(),
            error: None,
        }
    }

    /// Builds a failing report naming the absent markers.
    #[must_use]
    pub const fn fail_missing(path: String, missing: Vec<String>) -> Self {
        Self {
            path,
            status: PageStatus::Fail,
            missing,
            error: None,
        }
    }

    /// Builds a failing report for a page that could not be read.
    #[must_use]
    pub const fn fail_error(path: String, error: String) -> Self {
        Self {
            path,
            status: PageStatus::Fail,
            missing: Vec::new(),
            error: Some(error),
        }
    }

    /// Returns true when the page passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == PageStatus::Pass
    }
}

// ============================================================================
// SECTION: Audit Report
// ============================================================================

/// Aggregate report across all pages in a manifest.
///
/// # Invariants
/// - `passed` is true only when every page report passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Per-page reports, in manifest order.
    pub pages: Vec<PageReport>,
    /// Overall outcome.
    pub passed: bool,
}

impl AuditReport {
    /// Builds an aggregate report from per-page results.
    #[must_use]
    pub fn new(pages: Vec<PageReport>) -> Self {
        let passed = pages.iter().all(PageReport::passed);
        Self {
            pages,
            passed,
        }
    }
}
