//! Record output.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RecordSink`] | Destination the traversal hands records to |
//! | [`RecordWriter`] | Append-only delimited file with a one-time header |

// ============================================================================
// Imports
// ============================================================================

use crate::catalog::Record;
use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

/// Append-only delimited file writer.
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use writer::RecordWriter;

// ============================================================================
// RecordSink
// ============================================================================

/// Destination for extracted records.
///
/// Records are appended in traversal order. A failing append aborts the
/// traversal.
pub trait RecordSink {
    /// Stores one record.
    fn append(&mut self, record: &Record) -> Result<()>;
}

impl RecordSink for Vec<Record> {
    #[inline]
    fn append(&mut self, record: &Record) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
