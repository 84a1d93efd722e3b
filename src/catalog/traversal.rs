//! Listing/detail traversal loop.
//!
//! For each listing page: count the entries once, then for every index
//! re-resolve the entries, open the detail view, extract it, hand the
//! record to the sink and navigate back. When the page is exhausted the
//! [`PaginationResolver`] decides whether another page follows.
//!
//! Handles never outlive a navigation. The entry list is fetched again
//! after every `back`, so each click uses a handle from the current view.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, info};

use crate::browser::RenderedPage;
use crate::error::{Error, Result};
use crate::output::RecordSink;

use super::CatalogLayout;
use super::extractor::DetailExtractor;
use super::pagination::PaginationResolver;

// ============================================================================
// TraversalSummary
// ============================================================================

/// Counts reported after a completed traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Listing pages visited.
    pub pages: usize,
    /// Records handed to the sink.
    pub records: usize,
}

// ============================================================================
// TraversalController
// ============================================================================

/// Drives a [`RenderedPage`] through every listing page.
#[derive(Debug)]
pub struct TraversalController<'a, P> {
    page: &'a P,
    layout: &'a CatalogLayout,
    extractor: &'a DetailExtractor,
    resolver: PaginationResolver,
}

impl<'a, P: RenderedPage> TraversalController<'a, P> {
    /// Creates a controller over a page already showing the first listing.
    pub fn new(page: &'a P, layout: &'a CatalogLayout, extractor: &'a DetailExtractor) -> Self {
        Self {
            page,
            layout,
            extractor,
            resolver: PaginationResolver::new(layout.pager.clone(), layout.previous_label.clone()),
        }
    }

    /// Visits every entry of every listing page, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first navigation, extraction or sink failure. Records
    /// already handed to the sink stay there.
    pub async fn run<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<TraversalSummary> {
        let mut summary = TraversalSummary::default();

        self.page.wait_for_element(&self.layout.item).await?;

        loop {
            summary.pages += 1;
            let count = self.page.find_elements(&self.layout.item).await?.len();
            info!(page = summary.pages, items = count, "Processing listing page");

            for index in 0..count {
                self.visit(index).await?;

                let record = self.extractor.extract(self.page).await?;
                sink.append(&record)?;
                summary.records += 1;
                debug!(page = summary.pages, index, "Record stored");

                self.page.back().await?;
                self.page.wait_for_element(&self.layout.item).await?;
            }

            if !self.resolver.has_next(self.page).await? {
                break;
            }

            self.page.wait_for_element(&self.layout.item).await?;
        }

        info!(
            pages = summary.pages,
            records = summary.records,
            "Traversal complete"
        );

        Ok(summary)
    }

    /// Opens the detail view of entry `index` on the current listing.
    async fn visit(&self, index: usize) -> Result<()> {
        let items = self.page.find_elements(&self.layout.item).await?;
        let available = items.len();
        let item = items
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::missing_item(index, available))?;

        let button = self
            .page
            .find_child(&item, &self.layout.details_button)
            .await?
            .ok_or_else(|| Error::element_not_found(self.layout.details_button.to_string()))?;

        self.page.click(&button).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::fake::{FAKE_START, FakeCatalog};
    use crate::catalog::{Record, eprel};

    async fn traverse(catalog: &FakeCatalog) -> (Result<TraversalSummary>, Vec<Record>) {
        let layout = eprel::layout();
        let extractor = DetailExtractor::new(eprel::schema()).unwrap();
        let mut records = Vec::new();

        catalog.goto(FAKE_START).await.unwrap();
        let result = TraversalController::new(catalog, &layout, &extractor)
            .run(&mut records)
            .await;
        (result, records)
    }

    fn ids(from: u32, to: u32) -> Vec<String> {
        (from..=to).map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_page() {
        let catalog = FakeCatalog::tyres(&[3]);

        let (result, records) = traverse(&catalog).await;
        let summary = result.unwrap();

        assert_eq!(summary, TraversalSummary { pages: 1, records: 3 });
        assert_eq!(catalog.visits(), ids(1001, 1003));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("Number"), Some("1001"));
    }

    #[tokio::test]
    async fn test_visits_every_entry_of_every_page_once() {
        let catalog = FakeCatalog::tyres(&[4, 4, 4]);

        let (result, records) = traverse(&catalog).await;
        let summary = result.unwrap();

        assert_eq!(summary, TraversalSummary { pages: 3, records: 12 });
        assert_eq!(catalog.visits(), ids(1001, 1012));

        let numbers: Vec<_> = records.iter().filter_map(|r| r.get("Number")).collect();
        assert_eq!(numbers, ids(1001, 1012));
    }

    #[tokio::test]
    async fn test_short_last_page() {
        let catalog = FakeCatalog::tyres(&[2, 2, 1]);

        let (result, _) = traverse(&catalog).await;

        assert_eq!(result.unwrap().records, 5);
        assert_eq!(catalog.visits(), ids(1001, 1005));
        assert_eq!(catalog.listing_page(), Some(2));
    }

    #[tokio::test]
    async fn test_clicks_next_between_pages_only() {
        let catalog = FakeCatalog::tyres(&[1, 1]);

        let (result, _) = traverse(&catalog).await;
        result.unwrap();

        assert_eq!(
            catalog.clicks(),
            vec!["details:1001", "pager:Next", "details:1002"]
        );
    }

    #[tokio::test]
    async fn test_disabled_next_ends_traversal() {
        let catalog = FakeCatalog::tyres(&[2, 1]).with_disabled_next_on_last();

        let (result, _) = traverse(&catalog).await;

        assert_eq!(result.unwrap(), TraversalSummary { pages: 2, records: 3 });
        assert_eq!(
            catalog.clicks(),
            vec!["details:1001", "details:1002", "pager:Next", "details:1003"]
        );
        assert_eq!(catalog.listing_page(), Some(1));
    }

    #[tokio::test]
    async fn test_handles_from_previous_view_are_stale() {
        let catalog = FakeCatalog::tyres(&[2]);
        let layout = eprel::layout();
        catalog.goto(FAKE_START).await.unwrap();

        let items = catalog.find_elements(&layout.item).await.unwrap();
        let button = catalog
            .find_child(&items[0], &layout.details_button)
            .await
            .unwrap()
            .unwrap();
        catalog.click(&button).await.unwrap();
        catalog.back().await.unwrap();

        let err = catalog
            .find_child(&items[1], &layout.details_button)
            .await
            .unwrap_err();
        assert!(err.is_navigation_fault());
    }

    #[tokio::test]
    async fn test_empty_listing_times_out() {
        let catalog = FakeCatalog::tyres(&[0]);

        let (result, records) = traverse(&catalog).await;

        assert!(result.unwrap_err().is_timeout());
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_stops_traversal() {
        struct Failing(usize);

        impl RecordSink for Failing {
            fn append(&mut self, _record: &Record) -> Result<()> {
                self.0 += 1;
                if self.0 == 2 {
                    return Err(Error::Io(std::io::Error::other("disk full")));
                }
                Ok(())
            }
        }

        let catalog = FakeCatalog::tyres(&[3]);
        let layout = eprel::layout();
        let extractor = DetailExtractor::new(eprel::schema()).unwrap();
        catalog.goto(FAKE_START).await.unwrap();

        let mut sink = Failing(0);
        let err = TraversalController::new(&catalog, &layout, &extractor)
            .run(&mut sink)
            .await
            .unwrap_err();

        assert!(err.is_io_fault());
        assert_eq!(catalog.visits(), ids(1001, 1002));
    }
}
