//! [`RenderedPage`] over a W3C WebDriver session.
//!
//! Any WebDriver endpoint works; the default capabilities target
//! chromedriver (`goog:chromeOptions`).
//!
//! # Example
//!
//! ```no_run
//! use eprel_scraper::{BrowserOptions, RenderedPage, WebDriverPage};
//!
//! # async fn example() -> eprel_scraper::Result<()> {
//! let page = WebDriverPage::connect("http://localhost:9515", &BrowserOptions::new()).await?;
//! page.goto("https://eprel.ec.europa.eu/screen/product/tyres").await?;
//! page.close().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

use super::options::BrowserOptions;
use super::selector::{By, Query};
use super::RenderedPage;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for wait_for_element (30 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Script used for click dispatch.
const CLICK_SCRIPT: &str = "arguments[0].click();";

// ============================================================================
// WebDriverPage
// ============================================================================

/// One WebDriver session driving one browsing context.
#[derive(Clone)]
pub struct WebDriverPage {
    client: Client,
    wait_timeout: Duration,
}

impl fmt::Debug for WebDriverPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDriverPage")
            .field("wait_timeout", &self.wait_timeout)
            .finish_non_exhaustive()
    }
}

impl WebDriverPage {
    /// Creates a session on the WebDriver endpoint at `webdriver_url`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `options` are invalid
    /// - [`Error::Session`] if the endpoint refuses the session
    pub async fn connect(webdriver_url: &str, options: &BrowserOptions) -> Result<Self> {
        options.validate().map_err(Error::config)?;

        debug!(
            webdriver = %webdriver_url,
            args = options.to_args().len(),
            "Creating WebDriver session"
        );

        let mut builder = ClientBuilder::native();
        builder.capabilities(options.to_capabilities());
        let client = builder
            .connect(webdriver_url)
            .await
            .map_err(|e| Error::session(format!("{webdriver_url}: {e}")))?;

        info!(
            webdriver = %webdriver_url,
            headless = options.is_headless(),
            "WebDriver session created"
        );

        Ok(Self::from_client(client))
    }

    /// Wraps an existing client.
    #[inline]
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Sets the wait budget used by [`RenderedPage::wait_for_element`].
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Returns the underlying WebDriver client.
    #[inline]
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Borrows a lowered query as a fantoccini locator.
fn locator(query: &Query) -> Locator<'_> {
    match query {
        Query::Css(selector) => Locator::Css(selector),
        Query::XPath(expr) => Locator::XPath(expr),
    }
}

// ============================================================================
// RenderedPage
// ============================================================================

#[async_trait]
impl RenderedPage for WebDriverPage {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_for_element(&self, by: &By) -> Result<Element> {
        debug!(
            locator = %by,
            timeout_ms = self.wait_timeout.as_millis(),
            "Waiting for element"
        );

        let query = by.to_query();
        let result = self
            .client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(locator(&query))
            .await;

        match result {
            Ok(element) => Ok(element),
            Err(CmdError::WaitTimeout) => Err(Error::timeout(
                format!("wait_for({by})"),
                self.wait_timeout.as_millis() as u64,
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
        let query = by.to_query();
        let elements = self.client.find_all(locator(&query)).await?;
        debug!(locator = %by, count = elements.len(), "Found elements");
        Ok(elements)
    }

    async fn find_child(&self, parent: &Element, by: &By) -> Result<Option<Element>> {
        let query = by.to_query();
        let children = parent.find_all(locator(&query)).await?;
        Ok(children.into_iter().next())
    }

    async fn text(&self, element: &Element) -> Result<String> {
        Ok(element.text().await?)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        Ok(element.attr(name).await?)
    }

    async fn click(&self, element: &Element) -> Result<()> {
        debug!("Clicking element");
        let arg = serde_json::to_value(element)?;
        self.client.execute(CLICK_SCRIPT, vec![arg]).await?;
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        debug!("Navigating back");
        self.client.back().await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }

    async fn close(&self) -> Result<()> {
        info!("Closing WebDriver session");
        self.client.clone().close().await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
