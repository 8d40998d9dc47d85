//! Navigation requests coming from links elsewhere on the page.

use serde::Serialize;

use crate::BlockId;

/// A request to open a specific block and bring it into view.
///
/// Never closes its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    target: BlockId,
}

impl NavigationRequest {
    #[must_use]
    pub fn new(target: BlockId) -> Self {
        Self { target }
    }

    /// Builds a request from a same-page anchor such as `#bloco1`.
    ///
    /// Returns `None` for anything that is not a non-empty fragment.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        let fragment = href.trim().strip_prefix('#')?;
        BlockId::new(fragment).ok().map(Self::new)
    }

    #[must_use]
    pub fn target(&self) -> &BlockId {
        &self.target
    }
}

/// What the caller should do with the originating browser event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Suppress native anchor navigation; the registry owns open and scroll.
    PreventDefault,
    /// Not a same-page anchor; let the event proceed.
    Proceed,
}

impl Disposition {
    /// Classifies a link `href`: any same-page fragment is taken over, even one
    /// that does not resolve to a block.
    #[must_use]
    pub fn for_href(href: &str) -> Self {
        if href.trim().starts_with('#') {
            Self::PreventDefault
        } else {
            Self::Proceed
        }
    }
}
