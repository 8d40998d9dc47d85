//! Collapsible block registry.
//!
//! Owns the open/closed state of every block on a page and the deferred
//! scroll-into-view effects that follow an open. Detecting clicks is the
//! host's job: it calls [`Registry::activate`] for trigger clicks and
//! [`Registry::navigate`] for cross-reference links, then drives
//! [`Registry::advance`] from its own clock.

mod listeners;
mod registry;
mod scroll;
mod view;

pub use registry::Registry;
pub use scroll::ScrollPort;
pub use view::{BlockView, IndicatorView};
