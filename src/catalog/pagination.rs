//! Pagination control resolution.
//!
//! The listing page renders up to two standalone icon links, "Previous"
//! and "Next". [`PaginationResolver::resolve`] classifies what is on the
//! page once into [`PagerControls`]; [`PaginationResolver::advance`]
//! clicks "Next" when there is one. [`PaginationResolver::has_next`]
//! does both.
//!
//! | Enabled controls | Result |
//! |------------------|--------|
//! | 0 | [`PagerControls::Absent`] |
//! | 1, text is the previous label | [`PagerControls::PreviousOnly`] |
//! | 1, any other text | [`PagerControls::NextOnly`] |
//! | 2 or more | [`PagerControls::Both`] (first and last) |
//!
//! Controls marked disabled (`aria-disabled="true"`, a `disabled`
//! attribute or a `disabled` class token) are dropped before counting.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, info, warn};

use crate::browser::{By, RenderedPage};
use crate::error::Result;

// ============================================================================
// PagerControls
// ============================================================================

/// Pagination controls present on one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerControls<E> {
    /// No controls: single-page catalog.
    Absent,
    /// Only "Previous": last page.
    PreviousOnly,
    /// Only "Next": first page.
    NextOnly(E),
    /// Both controls: an inner page.
    Both {
        /// "Previous" control.
        previous: E,
        /// "Next" control.
        next: E,
    },
}

impl<E> PagerControls<E> {
    /// Returns `true` if a further page can be reached.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        matches!(self, Self::NextOnly(_) | Self::Both { .. })
    }

    /// Returns `true` if an earlier page can be reached.
    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        matches!(self, Self::PreviousOnly | Self::Both { .. })
    }

    /// Returns the number of controls classified.
    #[inline]
    #[must_use]
    pub fn control_count(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::PreviousOnly | Self::NextOnly(_) => 1,
            Self::Both { .. } => 2,
        }
    }

    /// Returns the "Next" control, if any.
    #[inline]
    #[must_use]
    pub fn into_next(self) -> Option<E> {
        match self {
            Self::NextOnly(next) | Self::Both { next, .. } => Some(next),
            Self::Absent | Self::PreviousOnly => None,
        }
    }
}

// ============================================================================
// PaginationResolver
// ============================================================================

/// Locates and drives the listing page's pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationResolver {
    controls: By,
    previous_label: String,
}

impl PaginationResolver {
    /// Creates a resolver for controls matching `controls`.
    #[inline]
    pub fn new(controls: By, previous_label: impl Into<String>) -> Self {
        Self {
            controls,
            previous_label: previous_label.into(),
        }
    }

    /// Classifies the controls on the current listing page.
    pub async fn resolve<P: RenderedPage>(&self, page: &P) -> Result<PagerControls<P::Element>> {
        let found = page.find_elements(&self.controls).await?;
        let total = found.len();

        let mut enabled = Vec::with_capacity(total);
        for control in found {
            if is_disabled(page, &control).await? {
                debug!("Skipping disabled pagination control");
            } else {
                enabled.push(control);
            }
        }

        let mut enabled = enabled.into_iter();
        let controls = match (enabled.next(), enabled.next_back()) {
            (None, _) => PagerControls::Absent,
            (Some(only), None) => {
                let text = page.text(&only).await?;
                if text.trim().eq_ignore_ascii_case(&self.previous_label) {
                    PagerControls::PreviousOnly
                } else {
                    PagerControls::NextOnly(only)
                }
            }
            (Some(previous), Some(next)) => {
                if enabled.len() > 0 {
                    warn!(
                        count = enabled.len() + 2,
                        "More than two pagination controls, using first and last"
                    );
                }
                PagerControls::Both { previous, next }
            }
        };

        debug!(
            found = total,
            classified = controls.control_count(),
            has_next = controls.has_next(),
            "Resolved pagination controls"
        );

        Ok(controls)
    }

    /// Advances to the next listing page if there is one.
    ///
    /// Returns `true` after clicking "Next", `false` without navigating
    /// otherwise.
    pub async fn has_next<P: RenderedPage>(&self, page: &P) -> Result<bool> {
        let controls = self.resolve(page).await?;
        self.advance(page, controls).await
    }

    /// Clicks the "Next" control of already resolved `controls`.
    ///
    /// Returns `false` without navigating when there is none.
    pub async fn advance<P: RenderedPage>(
        &self,
        page: &P,
        controls: PagerControls<P::Element>,
    ) -> Result<bool> {
        match controls.into_next() {
            Some(next) => {
                page.click(&next).await?;
                info!("Advanced to next listing page");
                Ok(true)
            }
            None => {
                info!("No further listing pages");
                Ok(false)
            }
        }
    }
}

/// Returns `true` if a control is rendered but inert.
async fn is_disabled<P: RenderedPage>(page: &P, control: &P::Element) -> Result<bool> {
    if let Some(value) = page.attribute(control, "aria-disabled").await?
        && value.trim().eq_ignore_ascii_case("true")
    {
        return Ok(true);
    }

    if page.attribute(control, "disabled").await?.is_some() {
        return Ok(true);
    }

    let class = page.attribute(control, "class").await?.unwrap_or_default();
    Ok(class
        .split_whitespace()
        .any(|token| token.contains("disabled")))
}

// ============================================================================
// Tests
// ============================================================================
