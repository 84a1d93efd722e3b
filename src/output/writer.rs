//! Append-only delimited file writer.
//!
//! The header is written once, before the first record, and only when
//! the file was absent or empty at the moment the writer was opened.
//! Reopening an existing non-empty file on a later run appends records
//! without a second header. Existing content is never rewritten.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::Record;
use crate::catalog::record::join;
use crate::error::{Error, Result};

use super::RecordSink;

// ============================================================================
// RecordWriter
// ============================================================================

/// Delimited file opened in append mode.
pub struct RecordWriter {
    path: PathBuf,
    file: File,
    header: Vec<String>,
    delimiter: char,
    needs_header: bool,
    written: usize,
}

impl fmt::Debug for RecordWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordWriter")
            .field("path", &self.path)
            .field("width", &self.header.len())
            .field("delimiter", &self.delimiter)
            .field("needs_header", &self.needs_header)
            .field("written", &self.written)
            .finish()
    }
}

impl RecordWriter {
    /// Opens (creating if needed) the destination for appending.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be inspected or opened.
    pub fn open(path: impl AsRef<Path>, header: Vec<String>, delimiter: char) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let needs_header = match std::fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!(path = %path.display(), needs_header, "Output opened");

        Ok(Self {
            path,
            file,
            header,
            delimiter,
            needs_header,
            written: 0,
        })
    }

    /// Returns the destination path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records appended by this writer.
    #[inline]
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns `true` if the header is still due.
    #[inline]
    #[must_use]
    pub fn needs_header(&self) -> bool {
        self.needs_header
    }

    /// Appends one record as a `\n`-terminated line.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaMismatch`] if the record width differs from the header
    /// - [`Error::Io`] if the write fails
    pub fn append(&mut self, record: &Record) -> Result<()> {
        if record.len() != self.header.len() {
            return Err(Error::schema_mismatch(self.header.len(), record.len()));
        }

        let mut chunk = String::new();
        if self.needs_header {
            chunk.push_str(&join(self.header.iter().map(String::as_str), self.delimiter));
            chunk.push('\n');
        }
        chunk.push_str(&record.to_line(self.delimiter));
        chunk.push('\n');

        self.file.write_all(chunk.as_bytes())?;
        self.file.flush()?;

        if self.needs_header {
            debug!(path = %self.path.display(), "Header written");
            self.needs_header = false;
        }
        self.written += 1;

        Ok(())
    }
}

impl RecordSink for RecordWriter {
    #[inline]
    fn append(&mut self, record: &Record) -> Result<()> {
        RecordWriter::append(self, record)
    }
}

// ============================================================================
// Tests
// ============================================================================
