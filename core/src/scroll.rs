//! Deferred scroll-into-view effects.

use std::time::Duration;

use collapsible_types::{DelayTimer, ScrollRequest};

/// The host's scroll-to-element primitive.
pub trait ScrollPort {
    fn scroll_into_view(&mut self, request: &ScrollRequest);
}

impl<F> ScrollPort for F
where
    F: FnMut(&ScrollRequest),
{
    fn scroll_into_view(&mut self, request: &ScrollRequest) {
        self(request);
    }
}

#[derive(Debug, Clone)]
struct PendingScroll {
    request: ScrollRequest,
    timer: DelayTimer,
}

/// Fire-and-forget queue: nothing is ever cancelled, and requests that come due
/// in the same advance are delivered in the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScrollQueue {
    pending: Vec<PendingScroll>,
}

impl ScrollQueue {
    pub(crate) fn schedule(&mut self, request: ScrollRequest, delay: Duration) {
        tracing::debug!(block = %request.block, delay = ?delay, "Scroll scheduled");
        self.pending.push(PendingScroll {
            request,
            timer: DelayTimer::new(delay),
        });
    }

    pub(crate) fn advance(&mut self, delta: Duration, port: &mut impl ScrollPort) -> usize {
        let mut fired = 0;
        let mut waiting = Vec::with_capacity(self.pending.len());
        for mut pending in self.pending.drain(..) {
            pending.timer.advance(delta);
            if pending.timer.is_due() {
                deliver(&pending.request, port);
                fired += 1;
            } else {
                waiting.push(pending);
            }
        }
        self.pending = waiting;
        fired
    }

    pub(crate) fn flush(&mut self, port: &mut impl ScrollPort) -> usize {
        let fired = self.pending.len();
        for pending in self.pending.drain(..) {
            deliver(&pending.request, port);
        }
        fired
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending request comes due.
    pub(crate) fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.timer.remaining()).min()
    }
}

fn deliver(request: &ScrollRequest, port: &mut impl ScrollPort) {
    tracing::debug!(block = %request.block, "Scroll into view");
    port.scroll_into_view(request);
}
