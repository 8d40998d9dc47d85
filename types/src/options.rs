//! Registry construction options.

use std::time::Duration;

use crate::{BlockId, ScrollBehavior};

/// Which block, if any, starts open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultOpen {
    /// Every block starts closed.
    #[default]
    None,
    /// Exactly this block starts open; every other block starts closed.
    Block(BlockId),
}

impl DefaultOpen {
    #[must_use]
    pub fn is_default_open(&self, id: &BlockId) -> bool {
        match self {
            Self::None => false,
            Self::Block(open) => open == id,
        }
    }
}

/// Delay between an open and its scroll-into-view.
///
/// Trigger opens wait longer so the expand transition has started before the
/// page moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollDelays {
    pub navigation: Duration,
    pub trigger: Duration,
}

impl ScrollDelays {
    pub const DEFAULT_NAVIGATION: Duration = Duration::from_millis(100);
    pub const DEFAULT_TRIGGER: Duration = Duration::from_millis(300);

    /// Fire on the next advance. Useful in tests.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            navigation: Duration::ZERO,
            trigger: Duration::ZERO,
        }
    }
}

impl Default for ScrollDelays {
    fn default() -> Self {
        Self {
            navigation: Self::DEFAULT_NAVIGATION,
            trigger: Self::DEFAULT_TRIGGER,
        }
    }
}

/// CSS class names and indicator glyphs used by the presentation projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub block: String,
    pub open: String,
    pub closed: String,
    pub indicator: String,
    pub open_glyph: String,
    pub closed_glyph: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            block: "accordion-block".to_string(),
            open: "accordion-open".to_string(),
            closed: "accordion-closed".to_string(),
            indicator: "accordion-toggle".to_string(),
            open_glyph: "\u{25BC}".to_string(),
            closed_glyph: "\u{25B6}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    pub default_open: DefaultOpen,
    /// Opening one block closes every other open block.
    pub exclusive: bool,
    pub delays: ScrollDelays,
    pub behavior: ScrollBehavior,
    pub classes: ClassNames,
}

impl RegistryOptions {
    #[must_use]
    pub fn with_default_open(mut self, id: BlockId) -> Self {
        self.default_open = DefaultOpen::Block(id);
        self
    }

    #[must_use]
    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    #[must_use]
    pub fn with_delays(mut self, delays: ScrollDelays) -> Self {
        self.delays = delays;
        self
    }
}
