// crates/content-gate-core/src/lib.rs
// ============================================================================
// Module: Content Gate Core
// Description: Page existence and required-content checking for static sites.
// Purpose: Provide the checker, manifest, and report types used by the CLI.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Content Gate verifies that static site pages exist and contain a fixed set
//! of required content markers. Checks are fail-closed: a page that cannot be
//! read, decoded, or bounded in size is a failure, never a silent pass.
//! Manifest inputs are untrusted and validated before any page is touched.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checker;
pub mod manifest;
pub mod page;
pub mod report;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use checker::CheckError;
pub use checker::CheckerConfig;
pub use checker::ContentChecker;
pub use checker::DEFAULT_MAX_PAGE_BYTES;
pub use checker::missing_markers;
pub use manifest::AuditManifest;
pub use manifest::ManifestError;
pub use manifest::PageEntry;
pub use page::PagePath;
pub use page::PagePathError;
pub use report::AuditReport;
pub use report::PageReport;
pub use report::PageStatus;
