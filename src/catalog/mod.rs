//! Catalog traversal and record extraction.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TraversalController`] | Listing/detail loop across all pages |
//! | [`PaginationResolver`] | Decides and triggers "next page" |
//! | [`DetailExtractor`] | Turns a detail view into a [`Record`] |
//! | [`ExtractionSchema`] | Declarative field list read by the extractor |
//! | [`CatalogLayout`] | Listing-page locators |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::browser::By;
use crate::error::{Error, Result};

// ============================================================================
// Submodules
// ============================================================================

/// Built-in EPREL tyre catalog layout and schema.
pub mod eprel;

/// Detail view extraction.
pub mod extractor;

/// Pagination control resolution.
pub mod pagination;

/// Record types.
pub mod record;

/// Declarative extraction schema.
pub mod schema;

/// Listing/detail traversal loop.
pub mod traversal;

// ============================================================================
// Re-exports
// ============================================================================

pub use extractor::DetailExtractor;
pub use pagination::{PagerControls, PaginationResolver};
pub use record::{Field, Record};
pub use schema::{ExtractionSchema, FieldSource, FieldSpec, NodeRef, TextRule};
pub use traversal::{TraversalController, TraversalSummary};

// ============================================================================
// CatalogLayout
// ============================================================================

/// Locators of the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLayout {
    /// One catalog entry.
    pub item: By,
    /// "Details" control, searched inside an entry.
    pub details_button: By,
    /// Previous/Next pagination controls.
    pub pager: By,
    /// Text identifying a lone "Previous" control.
    pub previous_label: String,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        eprel::layout()
    }
}

impl CatalogLayout {
    /// Validates the layout.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a locator or the previous label is empty.
    pub fn validate(&self) -> Result<()> {
        for (name, by) in [
            ("item", &self.item),
            ("details_button", &self.details_button),
            ("pager", &self.pager),
        ] {
            if by.value().trim().is_empty() {
                return Err(Error::config(format!("layout locator '{name}' is empty")));
            }
        }

        if self.previous_label.trim().is_empty() {
            return Err(Error::config("layout previous_label is empty"));
        }

        Ok(())
    }
}
