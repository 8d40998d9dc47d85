//! The collapsible block registry.
//!
//! The registry is the single source of truth for block state. Markup classes,
//! indicators and ARIA attributes are projections of that state (see
//! [`crate::view`]) and are never read back.
//!
//! Every operation addressed to an id that is not registered is a silent no-op.
//! Callers that need to tell "already in that state" apart from "unknown block"
//! should ask [`Registry::is_open`] first.

use std::collections::HashMap;
use std::time::Duration;

use collapsible_types::{
    BlockId, BlockSpec, BlockState, DefaultOpen, Disposition, IndicatorSlot, ListenerId,
    NavigationRequest, RegistryOptions, ScrollRequest, StateChange, TriggerId,
};

use crate::listeners::Listeners;
use crate::scroll::{ScrollPort, ScrollQueue};

#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub(crate) id: BlockId,
    pub(crate) state: BlockState,
    pub(crate) trigger: Option<TriggerId>,
    pub(crate) indicator_slot: IndicatorSlot,
}

#[derive(Debug)]
pub struct Registry {
    blocks: Vec<Block>,
    index: HashMap<BlockId, usize>,
    /// `TriggerId` value -> index into `blocks`. `None` once a duplicate
    /// registration has replaced the trigger's block.
    triggers: Vec<Option<usize>>,
    options: RegistryOptions,
    scrolls: ScrollQueue,
    listeners: Listeners,
}

impl Registry {
    /// Registers every spec in order. A repeated id replaces the earlier
    /// registration in place.
    pub fn new(specs: impl IntoIterator<Item = BlockSpec>, options: RegistryOptions) -> Self {
        let mut registry = Self {
            blocks: Vec::new(),
            index: HashMap::new(),
            triggers: Vec::new(),
            options,
            scrolls: ScrollQueue::default(),
            listeners: Listeners::default(),
        };

        for spec in specs {
            registry.register(spec);
        }

        if let DefaultOpen::Block(id) = &registry.options.default_open
            && !registry.index.contains_key(id.as_str())
        {
            tracing::warn!(block = %id, "Default-open block not found; all blocks start closed");
        }

        tracing::debug!(
            blocks = registry.blocks.len(),
            triggers = registry.triggers.iter().flatten().count(),
            "Registry built"
        );
        registry
    }

    fn register(&mut self, spec: BlockSpec) {
        let state = if self.options.default_open.is_default_open(&spec.id) {
            BlockState::Open
        } else {
            BlockState::Closed
        };

        let position = match self.index.get(spec.id.as_str()) {
            Some(&existing) => {
                tracing::warn!(block = %spec.id, "Duplicate block id; last registration wins");
                if let Some(stale) = self.blocks[existing].trigger {
                    self.triggers[stale.value() as usize] = None;
                }
                existing
            }
            None => {
                self.blocks.push(Block {
                    id: spec.id.clone(),
                    state,
                    trigger: None,
                    indicator_slot: spec.indicator_slot,
                });
                self.index.insert(spec.id.clone(), self.blocks.len() - 1);
                self.blocks.len() - 1
            }
        };

        let trigger = spec.has_trigger.then(|| {
            let trigger = TriggerId::new(self.triggers.len() as u32);
            self.triggers.push(Some(position));
            trigger
        });

        let block = &mut self.blocks[position];
        block.state = state;
        block.trigger = trigger;
        block.indicator_slot = spec.indicator_slot;
    }

    #[must_use]
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|block| &block.id)
    }

    /// `None` is the "unknown block" sentinel.
    #[must_use]
    pub fn state(&self, id: &str) -> Option<BlockState> {
        self.position(id).map(|pos| self.blocks[pos].state)
    }

    /// `None` is the "unknown block" sentinel.
    #[must_use]
    pub fn is_open(&self, id: &str) -> Option<bool> {
        self.state(id).map(BlockState::is_open)
    }

    #[must_use]
    pub fn trigger_for(&self, id: &str) -> Option<TriggerId> {
        self.position(id).and_then(|pos| self.blocks[pos].trigger)
    }

    pub fn toggle(&mut self, id: &str) {
        let Some(pos) = self.position(id) else {
            tracing::trace!(block = id, "toggle: unknown block");
            return;
        };
        self.flip(pos);
    }

    /// Opens the block and schedules a scroll with the navigation delay.
    ///
    /// The scroll is scheduled even when the block was already open.
    pub fn open(&mut self, id: &str) {
        let Some(pos) = self.position(id) else {
            tracing::trace!(block = id, "open: unknown block");
            return;
        };
        self.open_at(pos);
        self.schedule_scroll(pos, self.options.delays.navigation);
    }

    pub fn close(&mut self, id: &str) {
        let Some(pos) = self.position(id) else {
            tracing::trace!(block = id, "close: unknown block");
            return;
        };
        self.set_state(pos, BlockState::Closed);
    }

    /// Trigger click: toggle the owning block, scrolling only when it opened.
    pub fn activate(&mut self, trigger: TriggerId) {
        let Some(pos) = self.triggers.get(trigger.value() as usize).copied().flatten() else {
            tracing::trace!(%trigger, "activate: unknown or replaced trigger");
            return;
        };
        if self.flip(pos).is_open() {
            self.schedule_scroll(pos, self.options.delays.trigger);
        }
    }

    /// Always opens, never closes. The originating event must not navigate.
    pub fn navigate(&mut self, request: &NavigationRequest) -> Disposition {
        self.open(request.target());
        Disposition::PreventDefault
    }

    /// Entry point for generic links that carry their target in an `href`.
    pub fn navigate_href(&mut self, href: &str) -> Disposition {
        let disposition = Disposition::for_href(href);
        if disposition == Disposition::PreventDefault
            && let Some(request) = NavigationRequest::from_href(href)
        {
            self.navigate(&request);
        }
        disposition
    }

    pub fn on_change(&mut self, listener: impl FnMut(&StateChange) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Advances pending scrolls and delivers every one that came due.
    pub fn advance(&mut self, delta: Duration, port: &mut impl ScrollPort) -> usize {
        self.scrolls.advance(delta, port)
    }

    /// Delivers every pending scroll regardless of remaining delay.
    pub fn flush(&mut self, port: &mut impl ScrollPort) -> usize {
        self.scrolls.flush(port)
    }

    #[must_use]
    pub fn pending_scrolls(&self) -> usize {
        self.scrolls.len()
    }

    #[must_use]
    pub fn next_scroll_due(&self) -> Option<Duration> {
        self.scrolls.next_due()
    }

    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn block(&self, id: &str) -> Option<&Block> {
        self.position(id).map(|pos| &self.blocks[pos])
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn flip(&mut self, pos: usize) -> BlockState {
        match self.blocks[pos].state.toggled() {
            BlockState::Open => self.open_at(pos),
            BlockState::Closed => self.set_state(pos, BlockState::Closed),
        }
        self.blocks[pos].state
    }

    fn open_at(&mut self, pos: usize) {
        if self.options.exclusive {
            let others: Vec<usize> = self
                .blocks
                .iter()
                .enumerate()
                .filter(|(other, block)| *other != pos && block.state.is_open())
                .map(|(other, _)| other)
                .collect();
            for other in others {
                self.set_state(other, BlockState::Closed);
            }
        }
        self.set_state(pos, BlockState::Open);
    }

    fn set_state(&mut self, pos: usize, state: BlockState) {
        let block = &mut self.blocks[pos];
        if block.state == state {
            return;
        }
        block.state = state;
        tracing::debug!(block = %block.id, state = state.as_str(), "Block state changed");

        let change = StateChange {
            block: block.id.clone(),
            state,
        };
        self.listeners.emit(&change);
    }

    fn schedule_scroll(&mut self, pos: usize, delay: Duration) {
        let request = ScrollRequest::new(self.blocks[pos].id.clone(), self.options.behavior);
        self.scrolls.schedule(request, delay);
    }
}
