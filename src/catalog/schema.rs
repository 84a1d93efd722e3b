//! Declarative field-extraction schema.
//!
//! A schema is an ordered list of [`FieldSpec`]s. Each names a logical
//! field, says where its value lives on the detail view, and how the raw
//! text is cleaned. The field names double as the output header.
//!
//! # Example
//!
//! ```json
//! {
//!   "ready": {"strategy": "css", "value": ".product-title"},
//!   "fields": [
//!     {"name": "Title", "source": {"kind": "node", "locator": {"strategy": "css", "value": ".product-title span"}}},
//!     {"name": "Noise", "source": {"kind": "joined", "separator": "/", "parts": [
//!       {"locator": {"strategy": "css", "value": ".noise-class"}},
//!       {"locator": {"strategy": "css", "value": ".noise-db"}, "index": 1}
//!     ]}},
//!     {"name": "Label URL", "rule": "trim", "source": {"kind": "label_url",
//!       "image": {"strategy": "css", "value": "img[alt='Label']"},
//!       "attribute": "src",
//!       "template": "https://example.org/Label_{id}.svg"}}
//!   ]
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::browser::By;
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder replaced by the view id in label URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Default pattern for the id suffix of a detail view address.
pub const DEFAULT_ID_PATTERN: &str = r"[A-Za-z0-9_-]+$";

// ============================================================================
// TextRule
// ============================================================================

/// Post-processing applied to raw node text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRule {
    /// Keep the text as read.
    Raw,
    /// Strip leading and trailing whitespace.
    Trim,
    /// Trim and fold every whitespace run (line breaks included) into one space.
    #[default]
    Collapse,
}

impl TextRule {
    /// Applies the rule to `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Raw => text.to_string(),
            Self::Trim => text.trim().to_string(),
            Self::Collapse => text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// The `index`-th match of a locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    /// Locator matching one or more nodes.
    pub locator: By,
    /// Zero-based match index.
    #[serde(default)]
    pub index: usize,
}

impl NodeRef {
    /// Creates a node reference.
    #[inline]
    pub fn new(locator: By, index: usize) -> Self {
        Self { locator, index }
    }
}

/// Where a field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSource {
    /// Text of a single node.
    Node {
        /// Locator matching one or more nodes.
        locator: By,
        /// Zero-based match index.
        #[serde(default)]
        index: usize,
    },

    /// Texts of several nodes joined by a separator.
    Joined {
        /// Nodes in output order.
        parts: Vec<NodeRef>,
        /// Separator placed between part texts.
        separator: String,
    },

    /// Label image reference.
    ///
    /// Read from `attribute` of the `image` node when present, otherwise
    /// built from `template` with the id suffix of the current address.
    LabelUrl {
        /// Locator of the label image.
        image: By,
        /// Attribute holding the image address.
        attribute: String,
        /// Fallback template containing [`ID_PLACEHOLDER`].
        template: String,
        /// Pattern locating the id at the end of the address path.
        #[serde(default = "default_id_pattern")]
        id_pattern: String,
    },
}

fn default_id_pattern() -> String {
    DEFAULT_ID_PATTERN.to_string()
}

impl FieldSource {
    /// Creates a single-node source.
    #[inline]
    pub fn node(locator: By, index: usize) -> Self {
        Self::Node { locator, index }
    }

    /// Creates a joined source.
    #[inline]
    pub fn joined(parts: Vec<NodeRef>, separator: impl Into<String>) -> Self {
        Self::Joined {
            parts,
            separator: separator.into(),
        }
    }

    /// Creates a label source with the default id pattern.
    #[inline]
    pub fn label_url(image: By, attribute: impl Into<String>, template: impl Into<String>) -> Self {
        Self::LabelUrl {
            image,
            attribute: attribute.into(),
            template: template.into(),
            id_pattern: default_id_pattern(),
        }
    }
}

// ============================================================================
// FieldSpec
// ============================================================================

/// One logical field of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name.
    pub name: String,
    /// Value location.
    pub source: FieldSource,
    /// Text post-processing.
    #[serde(default)]
    pub rule: TextRule,
}

impl FieldSpec {
    /// Creates a field spec with the default rule.
    #[inline]
    pub fn new(name: impl Into<String>, source: FieldSource) -> Self {
        Self {
            name: name.into(),
            source,
            rule: TextRule::default(),
        }
    }

    /// Sets the text rule.
    #[inline]
    #[must_use]
    pub fn with_rule(mut self, rule: TextRule) -> Self {
        self.rule = rule;
        self
    }
}

// ============================================================================
// ExtractionSchema
// ============================================================================

/// Ordered field list interpreted by the detail extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSchema {
    /// Node whose presence marks the detail view as rendered.
    pub ready: By,
    /// Fields in output order.
    pub fields: Vec<FieldSpec>,
}

impl ExtractionSchema {
    /// Creates a schema.
    #[inline]
    pub fn new(ready: By, fields: Vec<FieldSpec>) -> Self {
        Self { ready, fields }
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Validates the schema.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the schema is empty, names repeat, a joined
    /// source has no parts, or a label template lacks [`ID_PLACEHOLDER`].
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::config("extraction schema has no fields"));
        }

        let mut names = FxHashSet::default();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(Error::config("field name must not be empty"));
            }
            if !names.insert(field.name.as_str()) {
                return Err(Error::config(format!("duplicate field name '{}'", field.name)));
            }

            match &field.source {
                FieldSource::Node { .. } => {}
                FieldSource::Joined { parts, .. } => {
                    if parts.is_empty() {
                        return Err(Error::config(format!(
                            "joined field '{}' has no parts",
                            field.name
                        )));
                    }
                }
                FieldSource::LabelUrl { template, .. } => {
                    if !template.contains(ID_PLACEHOLDER) {
                        return Err(Error::config(format!(
                            "label template of '{}' lacks {ID_PLACEHOLDER}",
                            field.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
