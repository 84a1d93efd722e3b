//! Scraper configuration.
//!
//! Every key is optional in a JSON configuration file; missing keys take
//! the EPREL tyre catalog defaults.
//!
//! ```json
//! {
//!   "output": "tyres.csv",
//!   "wait_timeout_secs": 60,
//!   "browser": { "headless": true }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::browser::BrowserOptions;
use crate::catalog::{CatalogLayout, ExtractionSchema, eprel};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default WebDriver endpoint (a local chromedriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Default element wait budget in seconds.
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// ScraperConfig
// ============================================================================

/// Complete configuration of one scraping run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// First listing page.
    pub start_url: String,
    /// WebDriver endpoint.
    pub webdriver_url: String,
    /// Output file, appended to.
    pub output: PathBuf,
    /// Field delimiter of the output file.
    pub delimiter: char,
    /// Element wait budget in seconds.
    pub wait_timeout_secs: u64,
    /// Browser launch options.
    pub browser: BrowserOptions,
    /// Listing page locators.
    pub layout: CatalogLayout,
    /// Detail view fields.
    pub schema: ExtractionSchema,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: eprel::START_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: DEFAULT_DELIMITER,
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            browser: BrowserOptions::default(),
            layout: eprel::layout(),
            schema: eprel::schema(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ScraperConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file cannot be read
    /// - [`Error::Json`] if it is not a valid configuration
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if the text is not a valid configuration.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ScraperConfig {
    /// Sets the first listing page.
    #[inline]
    #[must_use]
    pub fn with_start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    /// Sets the WebDriver endpoint.
    #[inline]
    #[must_use]
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Sets the output file.
    #[inline]
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Sets the field delimiter.
    #[inline]
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the element wait budget.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.wait_timeout_secs = secs;
        self
    }

    /// Sets the browser options.
    #[inline]
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserOptions) -> Self {
        self.browser = browser;
        self
    }

    /// Sets the listing layout.
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: CatalogLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the extraction schema.
    #[inline]
    #[must_use]
    pub fn with_schema(mut self, schema: ExtractionSchema) -> Self {
        self.schema = schema;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl ScraperConfig {
    /// Returns the element wait budget.
    #[inline]
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        Url::parse(self.start_url.trim())
            .map_err(|e| Error::config(format!("start_url '{}': {e}", self.start_url)))?;

        Url::parse(self.webdriver_url.trim())
            .map_err(|e| Error::config(format!("webdriver_url '{}': {e}", self.webdriver_url)))?;

        if self.output.as_os_str().is_empty() {
            return Err(Error::config("output path is empty"));
        }

        if matches!(self.delimiter, '\n' | '\r') {
            return Err(Error::config("delimiter must not be a line break"));
        }

        if self.wait_timeout_secs == 0 {
            return Err(Error::config("wait_timeout_secs must be positive"));
        }

        self.browser.validate().map_err(Error::config)?;
        self.layout.validate()?;
        self.schema.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================
