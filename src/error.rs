//! Error types for the catalog scraper.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use eprel_scraper::{Error, Result};
//!
//! async fn example<P: RenderedPage>(page: &P) -> Result<()> {
//!     let item = page.wait_for_element(&By::css("article")).await?;
//!     page.click(&item).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Navigation | [`Error::Session`], [`Error::WebDriver`], [`Error::ElementNotFound`], [`Error::StaleElement`], [`Error::MissingItem`], [`Error::Timeout`], [`Error::Url`] |
//! | Extraction | [`Error::MissingField`], [`Error::LabelReference`] |
//! | Output | [`Error::SchemaMismatch`], [`Error::Io`] |
//! | External | [`Error::Json`], [`Error::Url`] |
//!
//! None of these are retried. Any error aborts the run.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use fantoccini::error::CmdError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the scraper configuration is invalid or unreadable.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// WebDriver session could not be created.
    #[error("Session error: {message}")]
    Session {
        /// Description of the session failure.
        message: String,
    },

    /// WebDriver command failed.
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] CmdError),

    /// Element not found by locator.
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator used, as `strategy:value`.
        locator: String,
    },

    /// Element handle outlived the view it was resolved in.
    ///
    /// Every navigation invalidates previously resolved handles.
    #[error("Stale element: {element}")]
    StaleElement {
        /// Description of the stale handle.
        element: String,
    },

    /// A listing item present in the page snapshot disappeared.
    #[error("Listing item {index} missing: page now shows {count} items")]
    MissingItem {
        /// Zero-based index in the listing snapshot.
        index: usize,
        /// Number of items found after re-resolving.
        count: usize,
    },

    /// Operation timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Extraction Errors
    // ========================================================================
    /// Expected field node missing from the detail view.
    #[error("Missing field '{field}': no node {index} for {locator}")]
    MissingField {
        /// Logical field name.
        field: String,
        /// Locator used, as `strategy:value`.
        locator: String,
        /// Zero-based match index that was expected.
        index: usize,
    },

    /// Label reference could not be determined.
    #[error("Label reference error: {message}")]
    LabelReference {
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// Record width does not match the output header.
    #[error("Record has {actual} fields, header has {expected}")]
    SchemaMismatch {
        /// Header width.
        expected: usize,
        /// Record width.
        actual: usize,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a session error.
    #[inline]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element: impl Into<String>) -> Self {
        Self::StaleElement {
            element: element.into(),
        }
    }

    /// Creates a missing listing item error.
    #[inline]
    pub fn missing_item(index: usize, count: usize) -> Self {
        Self::MissingItem { index, count }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a missing field error.
    #[inline]
    pub fn missing_field(
        field: impl Into<String>,
        locator: impl Into<String>,
        index: usize,
    ) -> Self {
        Self::MissingField {
            field: field.into(),
            locator: locator.into(),
            index,
        }
    }

    /// Creates a label reference error.
    #[inline]
    pub fn label_reference(message: impl Into<String>) -> Self {
        Self::LabelReference {
            message: message.into(),
        }
    }

    /// Creates a schema mismatch error.
    #[inline]
    pub fn schema_mismatch(expected: usize, actual: usize) -> Self {
        Self::SchemaMismatch { expected, actual }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the page never reached the expected state.
    #[inline]
    #[must_use]
    pub fn is_navigation_fault(&self) -> bool {
        matches!(
            self,
            Self::Session { .. }
                | Self::WebDriver(_)
                | Self::ElementNotFound { .. }
                | Self::StaleElement { .. }
                | Self::MissingItem { .. }
                | Self::Timeout { .. }
                | Self::Url(_)
        )
    }

    /// Returns `true` if a detail view could not be turned into a record.
    #[inline]
    #[must_use]
    pub fn is_extraction_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::LabelReference { .. }
        )
    }

    /// Returns `true` if the output destination could not be written.
    #[inline]
    #[must_use]
    pub fn is_io_fault(&self) -> bool {
        matches!(self, Self::Io(_) | Self::SchemaMismatch { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::missing_field("Title", "css:.title span", 0);
        assert_eq!(
            err.to_string(),
            "Missing field 'Title': no node 0 for css:.title span"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("delimiter must not be a line break");
        assert_eq!(
            err.to_string(),
            "Configuration error: delimiter must not be a line break"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("wait_for(css:article)", 30_000);
        let other_err = Error::missing_item(3, 2);

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_fault_taxonomy() {
        let navigation = Error::stale_element("item#2@gen1");
        let extraction = Error::label_reference("no id");
        let io = Error::schema_mismatch(15, 14);

        assert!(navigation.is_navigation_fault());
        assert!(!navigation.is_extraction_fault());

        assert!(extraction.is_extraction_fault());
        assert!(!extraction.is_io_fault());

        assert!(io.is_io_fault());
        assert!(!io.is_navigation_fault());
    }

    #[test]
    fn test_missing_item_display() {
        let err = Error::missing_item(4, 3);
        assert_eq!(
            err.to_string(),
            "Listing item 4 missing: page now shows 3 items"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_io_fault());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err, Error::Url(_)));
        assert!(err.is_navigation_fault());
        assert!(!err.is_extraction_fault());
    }
}
