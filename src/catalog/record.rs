//! Extracted catalog records.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// Field
// ============================================================================

/// One named value of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Logical field name, also the output column header.
    pub name: String,
    /// Extracted value.
    pub value: String,
}

impl Field {
    /// Creates a field.
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// Ordered tuple of named fields read from one detail view.
///
/// Immutable once built. Field order is the schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Creates a record from fields in schema order.
    #[inline]
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the fields in order.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the value of the first field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Returns the values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.value.as_str())
    }

    /// Joins the values with `delimiter`, without a line terminator.
    ///
    /// Values are not quoted. A value containing the delimiter shifts
    /// every following column.
    #[must_use]
    pub fn to_line(&self, delimiter: char) -> String {
        join(self.values(), delimiter)
    }
}

/// Joins cells with a single delimiter character.
pub(crate) fn join<'a>(cells: impl Iterator<Item = &'a str>, delimiter: char) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(cell);
    }
    line
}

// ============================================================================
// Tests
// ============================================================================
