//! Core domain types for collapsible blocks.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the workspace.

mod block;
mod ids;
mod navigation;
mod options;
mod scroll;
mod timer;

pub use block::{BlockSpec, BlockState, IndicatorSlot, StateChange};
pub use ids::{BlockId, EmptyBlockIdError, ListenerId, TriggerId};
pub use navigation::{Disposition, NavigationRequest};
pub use options::{ClassNames, DefaultOpen, RegistryOptions, ScrollDelays};
pub use scroll::{ScrollAlign, ScrollBehavior, ScrollRequest};
pub use timer::DelayTimer;
