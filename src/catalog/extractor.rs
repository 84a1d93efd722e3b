//! Detail view extraction.
//!
//! [`DetailExtractor`] interprets an [`ExtractionSchema`] against the
//! currently rendered detail view. Extraction is all-or-nothing: the
//! first missing node aborts it and no partial [`Record`] is produced.

// ============================================================================
// Imports
// ============================================================================

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;
use url::Url;

use crate::browser::{By, RenderedPage};
use crate::error::{Error, Result};

use super::record::{Field, Record};
use super::schema::{ExtractionSchema, FieldSource, ID_PLACEHOLDER, TextRule};

/// Multi-match query results of one extraction, keyed by locator.
type NodeCache<'s, E> = FxHashMap<&'s By, Vec<E>>;

// ============================================================================
// DetailExtractor
// ============================================================================

/// Reads one [`Record`] from a rendered detail view.
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    schema: ExtractionSchema,
    /// Compiled id patterns, aligned with `schema.fields`.
    id_patterns: Vec<Option<Regex>>,
}

impl DetailExtractor {
    /// Creates an extractor for `schema`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the schema is invalid or an id pattern does
    /// not compile.
    pub fn new(schema: ExtractionSchema) -> Result<Self> {
        schema.validate()?;

        let id_patterns = schema
            .fields
            .iter()
            .map(|field| match &field.source {
                FieldSource::LabelUrl { id_pattern, .. } => Regex::new(id_pattern)
                    .map(Some)
                    .map_err(|e| {
                        Error::config(format!("id pattern of '{}': {e}", field.name))
                    }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            schema,
            id_patterns,
        })
    }

    /// Returns the schema.
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &ExtractionSchema {
        &self.schema
    }

    /// Extracts a record from the current detail view.
    ///
    /// Waits for the schema's ready node first.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the detail view never renders
    /// - [`Error::MissingField`] if a node is absent at its index
    /// - [`Error::LabelReference`] if neither label strategy yields a URL
    pub async fn extract<P: RenderedPage>(&self, page: &P) -> Result<Record> {
        page.wait_for_element(&self.schema.ready).await?;

        let mut nodes: NodeCache<'_, P::Element> = FxHashMap::default();
        let mut fields = Vec::with_capacity(self.schema.width());

        for (spec, id_pattern) in self.schema.fields.iter().zip(&self.id_patterns) {
            let value = match &spec.source {
                FieldSource::Node { locator, index } => {
                    let text = node_text(page, &mut nodes, &spec.name, locator, *index).await?;
                    spec.rule.apply(&text)
                }
                FieldSource::Joined { parts, separator } => {
                    let mut texts = Vec::with_capacity(parts.len());
                    for part in parts {
                        let text =
                            node_text(page, &mut nodes, &spec.name, &part.locator, part.index)
                                .await?;
                        texts.push(spec.rule.apply(&text));
                    }
                    texts.join(separator)
                }
                FieldSource::LabelUrl {
                    image,
                    attribute,
                    template,
                    ..
                } => {
                    let url = label_url(page, image, attribute, template, id_pattern.as_ref())
                        .await?;
                    spec.rule.apply(&url)
                }
            };

            debug!(field = %spec.name, value = %value, "Extracted field");
            fields.push(Field::new(spec.name.clone(), value));
        }

        Ok(Record::new(fields))
    }
}

// ============================================================================
// Field Readers
// ============================================================================

/// Reads the text of the `index`-th match of `locator`.
async fn node_text<'s, P: RenderedPage>(
    page: &P,
    nodes: &mut NodeCache<'s, P::Element>,
    field: &str,
    locator: &'s By,
    index: usize,
) -> Result<String> {
    if !nodes.contains_key(locator) {
        let found = page.find_elements(locator).await?;
        nodes.insert(locator, found);
    }

    let element = nodes
        .get(locator)
        .and_then(|found| found.get(index))
        .ok_or_else(|| Error::missing_field(field, locator.to_string(), index))?;

    page.text(element).await
}

/// Resolves the label reference of the current view.
///
/// Prefers the image attribute; falls back to the address template.
async fn label_url<P: RenderedPage>(
    page: &P,
    image: &By,
    attribute: &str,
    template: &str,
    id_pattern: Option<&Regex>,
) -> Result<String> {
    let current = page.current_url().await?;

    if let Some(element) = page.find_element(image).await?
        && let Some(src) = page.attribute(&element, attribute).await?
        && !src.trim().is_empty()
    {
        match current.join(src.trim()) {
            Ok(resolved) => {
                debug!(label = %resolved, "Label reference from image");
                return Ok(resolved.to_string());
            }
            Err(e) => debug!(src = %src, error = %e, "Unresolvable label image, using template"),
        }
    }

    let id = id_pattern
        .and_then(|pattern| view_id(&current, pattern))
        .ok_or_else(|| Error::label_reference(format!("no id suffix in {current}")))?;

    let url = template.replace(ID_PLACEHOLDER, &urlencoding::encode(id));
    debug!(label = %url, id = %id, "Label reference from address template");
    Ok(url)
}

/// Returns the id suffix of a detail view address.
///
/// Matched against the path with trailing slashes removed.
fn view_id<'u>(address: &'u Url, pattern: &Regex) -> Option<&'u str> {
    let path = address.path().trim_end_matches('/');
    pattern.find(path).map(|found| found.as_str()).filter(|id| !id.is_empty())
}

// ============================================================================
// Tests
// ============================================================================
