//! Block state and registration input.

use serde::{Deserialize, Serialize};

use crate::BlockId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockState {
    Open,
    #[default]
    Closed,
}

impl BlockState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Where the state indicator is attached inside a block's trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorSlot {
    /// Appended to the trigger element itself.
    #[default]
    Trigger,
    /// Appended to a dedicated slot nested in the trigger.
    Slot,
}

/// One discovered container, ready to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub id: BlockId,
    /// Blocks without a trigger are registered but only reachable programmatically.
    pub has_trigger: bool,
    pub indicator_slot: IndicatorSlot,
}

impl BlockSpec {
    #[must_use]
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_trigger: true,
            indicator_slot: IndicatorSlot::Trigger,
        }
    }

    #[must_use]
    pub fn without_trigger(mut self) -> Self {
        self.has_trigger = false;
        self
    }

    #[must_use]
    pub fn with_indicator_slot(mut self, slot: IndicatorSlot) -> Self {
        self.indicator_slot = slot;
        self
    }
}

/// Notification emitted whenever a block actually changes state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub block: BlockId,
    pub state: BlockState,
}
