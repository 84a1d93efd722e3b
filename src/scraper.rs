//! Run orchestration.
//!
//! A run opens the output, starts one browser session, loads the first
//! listing page, traverses the catalog and closes the session again,
//! also when the traversal fails.

// ============================================================================
// Imports
// ============================================================================

use tracing::{error, info};

use crate::browser::{RenderedPage, WebDriverPage};
use crate::catalog::{DetailExtractor, TraversalController, TraversalSummary};
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::output::{RecordSink, RecordWriter};

// ============================================================================
// Scraper
// ============================================================================

/// Configured scraper.
///
/// # Example
///
/// ```no_run
/// use eprel_scraper::{Scraper, ScraperConfig};
///
/// # async fn example() -> eprel_scraper::Result<()> {
/// let config = ScraperConfig::default().with_output("tyres.csv");
/// let summary = Scraper::new(config)?.run().await?;
/// println!("{} records", summary.records);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scraper {
    config: ScraperConfig,
    extractor: DetailExtractor,
}

impl Scraper {
    /// Validates `config` and prepares the extractor.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the configuration is invalid.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        let extractor = DetailExtractor::new(config.schema.clone())?;
        Ok(Self { config, extractor })
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Runs against a fresh WebDriver session, appending to the
    /// configured output file.
    ///
    /// # Errors
    ///
    /// Any output, session, navigation or extraction failure. Records
    /// written before the failure stay in the output.
    pub async fn run(&self) -> Result<TraversalSummary> {
        let mut writer = RecordWriter::open(
            &self.config.output,
            self.config.schema.header(),
            self.config.delimiter,
        )?;

        let page = WebDriverPage::connect(&self.config.webdriver_url, &self.config.browser)
            .await?
            .with_wait_timeout(self.config.wait_timeout());

        let summary = self.scrape(&page, &mut writer).await?;

        info!(
            path = %writer.path().display(),
            written = writer.written(),
            "Output complete"
        );

        Ok(summary)
    }

    /// Traverses the catalog on `page` into `sink`, then closes `page`.
    ///
    /// # Errors
    ///
    /// The traversal error if there is one, otherwise a failure to close.
    pub async fn scrape<P, S>(&self, page: &P, sink: &mut S) -> Result<TraversalSummary>
    where
        P: RenderedPage,
        S: RecordSink + ?Sized,
    {
        let outcome = self.traverse(page, sink).await;
        let closed = page.close().await;

        match outcome {
            Ok(summary) => {
                closed?;
                Ok(summary)
            }
            Err(e) => {
                if let Err(close_err) = closed {
                    error!(error = %close_err, "Failed to close session after error");
                }
                Err(e)
            }
        }
    }

    async fn traverse<P, S>(&self, page: &P, sink: &mut S) -> Result<TraversalSummary>
    where
        P: RenderedPage,
        S: RecordSink + ?Sized,
    {
        info!(url = %self.config.start_url, "Opening catalog");
        page.goto(&self.config.start_url).await?;

        TraversalController::new(page, &self.config.layout, &self.extractor)
            .run(sink)
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
