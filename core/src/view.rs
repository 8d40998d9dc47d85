//! Presentation projection of registry state.
//!
//! Views are recomputed from the registry on demand; nothing here is stored.

use serde::Serialize;

use collapsible_types::{BlockId, BlockState, IndicatorSlot};

use crate::registry::{Block, Registry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorView<'a> {
    pub slot: IndicatorSlot,
    pub class: &'a str,
    /// Open or closed glyph, matching the block's state.
    pub glyph: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView<'a> {
    pub id: &'a BlockId,
    pub state: BlockState,
    /// Control class followed by the state class.
    pub classes: [&'a str; 2],
    pub interactive: bool,
    /// Only present on blocks with a trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_expanded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<IndicatorView<'a>>,
}

impl Registry {
    /// One view per block, in registration order.
    pub fn views(&self) -> impl Iterator<Item = BlockView<'_>> {
        self.blocks().iter().map(|block| self.project(block))
    }

    #[must_use]
    pub fn view(&self, id: &str) -> Option<BlockView<'_>> {
        self.block(id).map(|block| self.project(block))
    }

    fn project<'a>(&'a self, block: &'a Block) -> BlockView<'a> {
        let classes = &self.options().classes;
        let (state_class, glyph) = match block.state {
            BlockState::Open => (classes.open.as_str(), classes.open_glyph.as_str()),
            BlockState::Closed => (classes.closed.as_str(), classes.closed_glyph.as_str()),
        };
        let interactive = block.trigger.is_some();

        BlockView {
            id: &block.id,
            state: block.state,
            classes: [classes.block.as_str(), state_class],
            interactive,
            aria_expanded: interactive.then_some(block.state.is_open()),
            indicator: interactive.then(|| IndicatorView {
                slot: block.indicator_slot,
                class: classes.indicator.as_str(),
                glyph,
            }),
        }
    }
}
