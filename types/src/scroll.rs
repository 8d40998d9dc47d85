//! Scroll-into-view requests handed to the host's scroll primitive.

use serde::Serialize;

use crate::BlockId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Vertical alignment of the target once scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlign {
    #[default]
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub block: BlockId,
    pub behavior: ScrollBehavior,
    pub align: ScrollAlign,
}

impl ScrollRequest {
    #[must_use]
    pub fn new(block: BlockId, behavior: ScrollBehavior) -> Self {
        Self {
            block,
            behavior,
            align: ScrollAlign::Start,
        }
    }
}
