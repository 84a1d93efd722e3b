//! Element locator strategies.
//!
//! Provides Selenium-like `By` selectors. Every locator is lowered to a
//! CSS selector or an XPath expression before it reaches WebDriver.
//!
//! # Example
//!
//! ```ignore
//! use eprel_scraper::By;
//!
//! // CSS selector (default)
//! let items = page.find_elements(&By::css("article")).await?;
//!
//! // By text content
//! let next = page.find_element(&By::text("Next")).await?;
//!
//! // Serialized form used in configuration files
//! // {"strategy": "css", "value": "img[alt='Label']"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// By::Css("article".into())
    /// By::Css("img[alt='Label']".into())
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID (shorthand for `#id` CSS selector).
    #[serde(rename = "id")]
    Id(String),

    /// Class name (single class, shorthand for `.class`).
    #[serde(rename = "class")]
    Class(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Exact text content match.
    ///
    /// Finds elements whose whitespace-normalized text equals the value.
    #[serde(rename = "text")]
    Text(String),

    /// Partial text content match.
    #[serde(rename = "partialText")]
    PartialText(String),
}

/// A locator lowered to one of the two WebDriver query languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// CSS selector.
    Css(String),
    /// XPath expression.
    XPath(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a text content selector.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a partial text content selector.
    #[inline]
    pub fn partial_text(text: impl Into<String>) -> Self {
        Self::PartialText(text.into())
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Class(_) => "class",
            Self::Tag(_) => "tag",
            Self::Text(_) => "text",
            Self::PartialText(_) => "partialText",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Class(v)
            | Self::Tag(v)
            | Self::Text(v)
            | Self::PartialText(v) => v,
        }
    }

    /// Lowers this locator to a CSS or XPath query.
    ///
    /// Text strategies match relative to the search root (`.//`), so the
    /// same query works for page-wide and child searches.
    #[must_use]
    pub fn to_query(&self) -> Query {
        match self {
            Self::Css(v) => Query::Css(v.clone()),
            Self::XPath(v) => Query::XPath(v.clone()),
            Self::Id(v) => Query::Css(format!("#{v}")),
            Self::Class(v) => Query::Css(format!(".{v}")),
            Self::Tag(v) => Query::Css(v.clone()),
            Self::Text(v) => Query::XPath(format!(
                ".//*[normalize-space(.)={}]",
                xpath_literal(v)
            )),
            Self::PartialText(v) => Query::XPath(format!(
                ".//*[contains(normalize-space(.), {})]",
                xpath_literal(v)
            )),
        }
    }
}

/// Quotes a string as an XPath 1.0 literal.
///
/// XPath has no escape syntax, so values holding both quote kinds are
/// spliced together with `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_css() {
        let by = By::Css("article".to_string());
        assert_eq!(by.strategy(), "css");
        assert_eq!(by.value(), "article");
        assert_eq!(by.to_query(), Query::Css("article".to_string()));
    }

    #[test]
    fn test_by_id_lowers_to_css() {
        let by = By::id("main");
        assert_eq!(by.to_query(), Query::Css("#main".to_string()));
    }

    #[test]
    fn test_by_class_lowers_to_css() {
        let by = By::class("ecl-pagination__link");
        assert_eq!(
            by.to_query(),
            Query::Css(".ecl-pagination__link".to_string())
        );
    }

    #[test]
    fn test_by_text_lowers_to_relative_xpath() {
        let by = By::text("Next");
        assert_eq!(
            by.to_query(),
            Query::XPath(".//*[normalize-space(.)='Next']".to_string())
        );
    }

    #[test]
    fn test_xpath_literal_quotes() {
        assert_eq!(xpath_literal("plain"), "'plain'");
        assert_eq!(xpath_literal("it's"), "\"it's\"");
        assert_eq!(
            xpath_literal("it's \"x\""),
            "concat('it', \"'\", 's \"x\"')"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(By::css("img[alt='Label']").to_string(), "css:img[alt='Label']");
        assert_eq!(By::partial_text("Prev").to_string(), "partialText:Prev");
    }

    #[test]
    fn test_from_str() {
        let by: By = "article".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_serde_shape() {
        let by = By::css("article");
        let json = serde_json::to_value(&by).unwrap();
        assert_eq!(json, serde_json::json!({"strategy": "css", "value": "article"}));

        let back: By = serde_json::from_value(json).unwrap();
        assert_eq!(back, by);
    }
}
