//! Scripted in-memory catalog implementing [`RenderedPage`].
//!
//! Models a listing/detail application with history. Every navigation
//! bumps a generation counter and handles from older generations fail
//! with [`Error::StaleElement`], the same way a real re-render detaches
//! nodes.

use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use crate::catalog::{CatalogLayout, eprel};
use crate::error::{Error, Result};

use super::{By, RenderedPage};

pub(crate) const FAKE_START: &str = "https://catalog.test/screen/product/tyres";

// ============================================================================
// FakeDetail
// ============================================================================

/// Content of one detail view.
#[derive(Debug, Clone)]
pub(crate) struct FakeDetail {
    pub id: String,
    pub nodes: Vec<(By, Vec<String>)>,
    pub label_src: Option<String>,
}

impl FakeDetail {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            label_src: None,
        }
    }

    pub fn node(mut self, by: By, texts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.nodes.retain(|(existing, _)| *existing != by);
        self.nodes
            .push((by, texts.into_iter().map(Into::into).collect()));
        self
    }

    pub fn without(mut self, by: &By) -> Self {
        self.nodes.retain(|(existing, _)| existing != by);
        self
    }

    pub fn label(mut self, src: impl Into<String>) -> Self {
        self.label_src = Some(src.into());
        self
    }

    /// Tyre detail populated for the built-in schema.
    ///
    /// Attribute `n` reads `v{n}-{id}`, noise is `B/71`.
    pub fn tyre(id: &str) -> Self {
        let info: Vec<String> = (0..eprel::INFO_FIELDS.len())
            .map(|n| {
                if n == eprel::NOISE_POSITION {
                    "B".to_string()
                } else {
                    format!("v{n}-{id}")
                }
            })
            .collect();

        Self::new(id)
            .node(By::css(eprel::TITLE_BLOCK), [format!("Tyre {id} {id}")])
            .node(By::css(eprel::TITLE), [format!("Tyre {id}")])
            .node(By::css(eprel::NUMBER), [format!(" {id}\n")])
            .node(By::css(eprel::INFO_VALUE), info)
            .node(By::css(eprel::NOISE_CLASS), ["B"])
            .node(By::css(eprel::NOISE_DB), ["B", "71"])
    }

    fn texts(&self, by: &By) -> &[String] {
        self.nodes
            .iter()
            .find(|(existing, _)| existing == by)
            .map(|(_, texts)| texts.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Elements
// ============================================================================

/// How a pagination control marks itself inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PagerState {
    Enabled,
    /// `aria-disabled="true"`.
    AriaDisabled,
    /// Bare `disabled` attribute.
    DisabledAttribute,
    /// `ecl-link--disabled` class token.
    DisabledClass,
}

impl PagerState {
    fn is_disabled(self) -> bool {
        self != Self::Enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FakeNode {
    Item(usize),
    DetailsButton(usize),
    Pager { label: String, state: PagerState },
    Text(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeElement {
    generation: u64,
    node: FakeNode,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum View {
    #[default]
    Blank,
    Listing(usize),
    Detail { page: usize, item: usize },
}

#[derive(Debug, Default)]
struct FakeState {
    view: View,
    generation: u64,
    history: Vec<View>,
    visits: Vec<String>,
    clicks: Vec<String>,
    closed: bool,
}

impl FakeState {
    fn navigate(&mut self, view: View) {
        self.history.push(self.view);
        self.view = view;
        self.generation += 1;
    }

    fn element(&self, node: FakeNode) -> FakeElement {
        FakeElement {
            generation: self.generation,
            node,
        }
    }

    fn live(&self, element: &FakeElement) -> Result<()> {
        if element.generation != self.generation {
            return Err(Error::stale_element(format!(
                "{:?}@{}",
                element.node, element.generation
            )));
        }
        Ok(())
    }
}

// ============================================================================
// FakeCatalog
// ============================================================================

pub(crate) struct FakeCatalog {
    layout: CatalogLayout,
    label_image: By,
    pages: Vec<Vec<FakeDetail>>,
    controls: Option<Vec<(String, PagerState)>>,
    disable_next_on_last: bool,
    state: Mutex<FakeState>,
}

impl FakeCatalog {
    pub fn new(pages: Vec<Vec<FakeDetail>>) -> Self {
        Self {
            layout: eprel::layout(),
            label_image: By::css(eprel::LABEL_IMAGE),
            pages,
            controls: None,
            disable_next_on_last: false,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Catalog of tyre details, ids numbered from 1001 in visiting order.
    pub fn tyres(page_sizes: &[usize]) -> Self {
        let mut next_id = 1001;
        let pages = page_sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        let detail = FakeDetail::tyre(&next_id.to_string());
                        next_id += 1;
                        detail
                    })
                    .collect()
            })
            .collect();
        Self::new(pages)
    }

    /// Renders exactly these pagination controls on every listing page.
    ///
    /// Disabled controls carry `aria-disabled="true"`.
    pub fn with_controls(self, controls: &[(&str, bool)]) -> Self {
        let controls: Vec<_> = controls
            .iter()
            .map(|&(label, disabled)| {
                let state = if disabled {
                    PagerState::AriaDisabled
                } else {
                    PagerState::Enabled
                };
                (label, state)
            })
            .collect();
        self.with_pager(&controls)
    }

    /// Renders exactly these pagination controls, each with its own marker.
    pub fn with_pager(mut self, controls: &[(&str, PagerState)]) -> Self {
        self.controls = Some(
            controls
                .iter()
                .map(|(label, state)| ((*label).to_string(), *state))
                .collect(),
        );
        self
    }

    /// Keeps a disabled "Next" control on the last listing page.
    pub fn with_disabled_next_on_last(mut self) -> Self {
        self.disable_next_on_last = true;
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().visits.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn listing_page(&self) -> Option<usize> {
        match self.state.lock().view {
            View::Listing(page) => Some(page),
            _ => None,
        }
    }

    fn pager(&self, page: usize) -> Vec<(String, PagerState)> {
        if let Some(controls) = &self.controls {
            return controls.clone();
        }

        let mut controls = Vec::new();
        if page > 0 {
            controls.push((eprel::PREVIOUS_LABEL.to_string(), PagerState::Enabled));
        }
        if page + 1 < self.pages.len() {
            controls.push(("Next".to_string(), PagerState::Enabled));
        } else if self.disable_next_on_last && self.pages.len() > 1 {
            controls.push(("Next".to_string(), PagerState::AriaDisabled));
        }
        controls
    }

    fn query(&self, state: &FakeState, by: &By) -> Vec<FakeNode> {
        match state.view {
            View::Blank => Vec::new(),
            View::Listing(page) => {
                if *by == self.layout.item {
                    let count = self.pages.get(page).map_or(0, Vec::len);
                    (0..count).map(FakeNode::Item).collect()
                } else if *by == self.layout.pager {
                    self.pager(page)
                        .into_iter()
                        .map(|(label, state)| FakeNode::Pager { label, state })
                        .collect()
                } else {
                    Vec::new()
                }
            }
            View::Detail { page, item } => {
                let detail = &self.pages[page][item];
                if *by == self.label_image {
                    detail
                        .label_src
                        .iter()
                        .map(|src| FakeNode::Image(src.clone()))
                        .collect()
                } else {
                    detail
                        .texts(by)
                        .iter()
                        .map(|text| FakeNode::Text(text.clone()))
                        .collect()
                }
            }
        }
    }
}

// ============================================================================
// RenderedPage
// ============================================================================

#[async_trait]
impl RenderedPage for FakeCatalog {
    type Element = FakeElement;

    async fn goto(&self, _url: &str) -> Result<()> {
        self.state.lock().navigate(View::Listing(0));
        Ok(())
    }

    async fn wait_for_element(&self, by: &By) -> Result<FakeElement> {
        self.find_elements(by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::timeout(format!("wait_for({by})"), 0))
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<FakeElement>> {
        let state = self.state.lock();
        Ok(self
            .query(&state, by)
            .into_iter()
            .map(|node| state.element(node))
            .collect())
    }

    async fn find_child(&self, parent: &FakeElement, by: &By) -> Result<Option<FakeElement>> {
        let state = self.state.lock();
        state.live(parent)?;
        match parent.node {
            FakeNode::Item(index) if *by == self.layout.details_button => {
                Ok(Some(state.element(FakeNode::DetailsButton(index))))
            }
            _ => Ok(None),
        }
    }

    async fn text(&self, element: &FakeElement) -> Result<String> {
        let state = self.state.lock();
        state.live(element)?;
        Ok(match &element.node {
            FakeNode::Text(text) => text.clone(),
            FakeNode::Pager { label, .. } => format!(" {label} "),
            FakeNode::Item(index) => format!("item {index}"),
            FakeNode::DetailsButton(_) => "Details".to_string(),
            FakeNode::Image(_) => String::new(),
        })
    }

    async fn attribute(&self, element: &FakeElement, name: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        state.live(element)?;
        Ok(match (&element.node, name) {
            (FakeNode::Image(src), "src") => Some(src.clone()),
            (FakeNode::Pager { state, .. }, "aria-disabled") => {
                Some((*state == PagerState::AriaDisabled).to_string())
            }
            (FakeNode::Pager { state: PagerState::DisabledAttribute, .. }, "disabled") => {
                Some(String::new())
            }
            (FakeNode::Pager { state, .. }, "class") => Some(match state {
                PagerState::DisabledClass => "ecl-pagination__link ecl-link ecl-link--disabled",
                _ => "ecl-pagination__link ecl-link",
            }
            .to_string()),
            _ => None,
        })
    }

    async fn click(&self, element: &FakeElement) -> Result<()> {
        let mut state = self.state.lock();
        state.live(element)?;

        match (&element.node, state.view) {
            (FakeNode::DetailsButton(item), View::Listing(page)) => {
                let id = self.pages[page][*item].id.clone();
                state.clicks.push(format!("details:{id}"));
                state.visits.push(id);
                state.navigate(View::Detail { page, item: *item });
            }
            (FakeNode::Pager { label, state: marker }, View::Listing(page)) => {
                state.clicks.push(format!("pager:{label}"));
                if marker.is_disabled() {
                    return Ok(());
                }
                if label == eprel::PREVIOUS_LABEL {
                    if page > 0 {
                        state.navigate(View::Listing(page - 1));
                    }
                } else if page + 1 < self.pages.len() {
                    state.navigate(View::Listing(page + 1));
                }
            }
            (node, _) => state.clicks.push(format!("inert:{node:?}")),
        }

        Ok(())
    }

    async fn back(&self) -> Result<()> {
        let mut state = self.state.lock();
        let previous = state.history.pop().unwrap_or(state.view);
        state.view = previous;
        state.generation += 1;
        Ok(())
    }

    async fn current_url(&self) -> Result<Url> {
        let state = self.state.lock();
        let address = match state.view {
            View::Blank => "about:blank".to_string(),
            View::Listing(page) => format!("{FAKE_START}?page={}", page + 1),
            View::Detail { page, item } => {
                format!("{FAKE_START}/{}", self.pages[page][item].id)
            }
        };
        Ok(Url::parse(&address)?)
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }
}
