//! Rendered-page client module.
//!
//! The scraper never talks to a browser directly. It consumes the
//! [`RenderedPage`] capability surface: element queries, text and
//! attribute reads, click dispatch and history navigation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RenderedPage`] | Capability trait consumed by the catalog code |
//! | [`By`] | Element locator strategy |
//! | [`BrowserOptions`] | Browser launch flags |
//! | [`WebDriverPage`] | `RenderedPage` over a W3C WebDriver session |
//!
//! # Handle lifetime
//!
//! Element handles belong to the view they were resolved in. Any
//! navigation (`goto`, `back`, or a `click` that changes the view)
//! invalidates every handle obtained before it. Callers re-resolve
//! instead of reusing.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

/// Browser launch options.
pub mod options;

/// Element locator strategies.
pub mod selector;

/// WebDriver-backed page client.
pub mod webdriver;

/// Scripted in-memory catalog for tests.
#[cfg(test)]
pub(crate) mod fake;

// ============================================================================
// Re-exports
// ============================================================================

pub use options::BrowserOptions;
pub use selector::{By, Query};
pub use webdriver::WebDriverPage;

// ============================================================================
// RenderedPage
// ============================================================================

/// A controllable rendered page.
///
/// One implementation drives one browsing context. Calls are issued
/// strictly in sequence.
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// Opaque handle to one element of the current view.
    type Element: Clone + fmt::Debug + Send + Sync;

    /// Navigates to a URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Waits until an element matching `by` is present and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`](crate::Error::Timeout) if nothing appears
    /// within the client's wait budget.
    async fn wait_for_element(&self, by: &By) -> Result<Self::Element>;

    /// Returns every element matching `by`, in document order.
    async fn find_elements(&self, by: &By) -> Result<Vec<Self::Element>>;

    /// Returns the first element matching `by`, if any. Does not wait.
    async fn find_element(&self, by: &By) -> Result<Option<Self::Element>> {
        Ok(self.find_elements(by).await?.into_iter().next())
    }

    /// Returns the first descendant of `parent` matching `by`, if any.
    async fn find_child(
        &self,
        parent: &Self::Element,
        by: &By,
    ) -> Result<Option<Self::Element>>;

    /// Reads the text content of an element.
    async fn text(&self, element: &Self::Element) -> Result<String>;

    /// Reads an attribute of an element.
    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Dispatches a click on an element.
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Navigates back in history.
    async fn back(&self) -> Result<()>;

    /// Returns the current address.
    async fn current_url(&self) -> Result<Url>;

    /// Releases the session.
    async fn close(&self) -> Result<()>;
}
