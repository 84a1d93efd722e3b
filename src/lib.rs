//! EPREL scraper - paginated catalog scraping over WebDriver.
//!
//! This library walks the EU product registry's tyre catalog
//! (`eprel.ec.europa.eu/screen/product/tyres`) page by page, opens every
//! entry's detail view in a real browser and appends one delimited line
//! per entry to an output file.
//!
//! # Architecture
//!
//! - **Page client**: [`RenderedPage`] is the capability surface the
//!   catalog code drives; [`WebDriverPage`] implements it over a W3C
//!   WebDriver session (chromedriver by default)
//! - **Catalog**: [`TraversalController`] runs the listing/detail loop,
//!   [`PaginationResolver`] decides whether another page follows,
//!   [`DetailExtractor`] reads a detail view according to an
//!   [`ExtractionSchema`]
//! - **Output**: [`RecordWriter`] appends to a file, writing the header
//!   only when the file was new or empty
//!
//! Everything runs sequentially in a single browsing context. A failure
//! aborts the run; records already written stay in the output.
//!
//! # Quick Start
//!
//! ```no_run
//! use eprel_scraper::{Result, Scraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ScraperConfig::default().with_output("tyres.csv");
//!     let summary = Scraper::new(config)?.run().await?;
//!     println!("{} pages, {} records", summary.pages, summary.records);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Page capability trait, locators, WebDriver client |
//! | [`catalog`] | Traversal, pagination, extraction, records |
//! | [`config`] | Run configuration |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`output`] | Record sinks and the append-only writer |
//! | [`scraper`] | Run orchestration |

// ============================================================================
// Modules
// ============================================================================

/// Page client: capability trait, locators, launch options.
///
/// - [`RenderedPage`] - What the catalog code needs from a browser
/// - [`WebDriverPage`] - WebDriver-backed implementation
pub mod browser;

/// Catalog traversal and record extraction.
pub mod catalog;

/// Run configuration.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Record output.
pub mod output;

/// Run orchestration.
pub mod scraper;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{BrowserOptions, By, RenderedPage, WebDriverPage};

// Catalog types
pub use catalog::{
    CatalogLayout, DetailExtractor, ExtractionSchema, Field, FieldSource, FieldSpec, NodeRef,
    PagerControls, PaginationResolver, Record, TextRule, TraversalController, TraversalSummary,
};

// Configuration
pub use config::ScraperConfig;

// Error types
pub use error::{Error, Result};

// Output types
pub use output::{RecordSink, RecordWriter};

// Orchestration
pub use scraper::Scraper;
