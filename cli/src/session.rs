//! A registry bound to one scanned page, emitting JSON events.
//!
//! Each event is one line of JSON tagged by `"event"`. State changes are
//! collected by a registry listener and flushed after every command, so a
//! command's output always follows the order the registry produced it.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use collapsible_core::{BlockView, Registry};
use collapsible_markup::{NavigationLink, PageScan};
use collapsible_types::{
    BlockId, BlockState, Disposition, NavigationRequest, RegistryOptions, ScrollAlign,
    ScrollBehavior, ScrollRequest, StateChange,
};

use crate::command::Command;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Ready {
        blocks: usize,
        triggers: usize,
        skipped: usize,
        links: usize,
    },
    View(BlockView<'a>),
    Changed {
        block: &'a BlockId,
        state: BlockState,
    },
    Scroll {
        block: &'a BlockId,
        behavior: ScrollBehavior,
        align: ScrollAlign,
    },
    Navigated {
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<&'a BlockId>,
        disposition: Disposition,
    },
    State {
        block: &'a str,
        /// `null` for blocks the page does not have.
        state: Option<BlockState>,
    },
    Link {
        index: usize,
        label: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        href: Option<&'a str>,
        target: Option<&'a BlockId>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    registry: Registry,
    links: Vec<NavigationLink>,
    skipped: usize,
    changes: Rc<RefCell<Vec<StateChange>>>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(page: PageScan, options: RegistryOptions, out: W) -> Self {
        let mut registry = Registry::new(page.blocks, options);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        registry.on_change(move |change| sink.borrow_mut().push(change.clone()));

        Self {
            registry,
            links: page.links,
            skipped: page.skipped,
            changes,
            out,
        }
    }

    /// Announces the page and its initial projection.
    pub fn start(&mut self) -> Result<()> {
        let triggers = self
            .registry
            .ids()
            .filter(|id| self.registry.trigger_for(id).is_some())
            .count();
        write_event(&mut self.out, &Event::Ready {
            blocks: self.registry.len(),
            triggers,
            skipped: self.skipped,
            links: self.links.len(),
        })?;
        self.write_views()
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        tracing::debug!(?command, "Executing command");
        match command {
            Command::Click(id) => match self.registry.trigger_for(&id) {
                Some(trigger) => self.registry.activate(trigger),
                None => self.error(format!("block '{id}' has no trigger"))?,
            },
            Command::Nav(target) => self.nav(&target)?,
            Command::Link(index) => self.follow_link(index)?,
            Command::Open(id) => self.registry.open(&id),
            Command::Close(id) => self.registry.close(&id),
            Command::Toggle(id) => self.registry.toggle(&id),
            Command::State(Some(id)) => {
                let state = self.registry.state(&id);
                write_event(&mut self.out, &Event::State { block: &id, state })?;
            }
            Command::State(None) => self.write_views()?,
            Command::Links => {
                for (index, link) in self.links.iter().enumerate() {
                    write_event(&mut self.out, &Event::Link {
                        index,
                        label: &link.label,
                        href: link.href.as_deref(),
                        target: link.target.as_ref(),
                    })?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        self.write_changes()?;
        Ok(Flow::Continue)
    }

    /// Reports a line that failed to parse without stopping the session.
    pub fn reject(&mut self, message: impl Into<String>) -> Result<()> {
        self.error(message.into())
    }

    /// Advances pending scrolls by `delta` and reports the ones that fired.
    pub fn advance(&mut self, delta: Duration) -> Result<usize> {
        let mut fired = Vec::new();
        self.registry
            .advance(delta, &mut |request: &ScrollRequest| fired.push(request.clone()));
        self.write_scrolls(&fired)?;
        Ok(fired.len())
    }

    /// Delivers every scroll still waiting on its delay.
    pub fn finish(&mut self) -> Result<usize> {
        let mut fired = Vec::new();
        self.registry
            .flush(&mut |request: &ScrollRequest| fired.push(request.clone()));
        self.write_scrolls(&fired)?;
        self.out.flush()?;
        Ok(fired.len())
    }

    #[cfg(test)]
    pub fn next_scroll_due(&self) -> Option<Duration> {
        self.registry.next_scroll_due()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn nav(&mut self, target: &str) -> Result<()> {
        if target.starts_with('#') {
            let disposition = self.registry.navigate_href(target);
            let request = NavigationRequest::from_href(target);
            return write_event(&mut self.out, &Event::Navigated {
                target: request.as_ref().map(NavigationRequest::target),
                disposition,
            });
        }

        match BlockId::new(target) {
            Ok(id) => {
                let request = NavigationRequest::new(id);
                let disposition = self.registry.navigate(&request);
                write_event(&mut self.out, &Event::Navigated {
                    target: Some(request.target()),
                    disposition,
                })
            }
            Err(err) => self.error(err.to_string()),
        }
    }

    fn follow_link(&mut self, index: usize) -> Result<()> {
        let Some(link) = self.links.get(index).cloned() else {
            return self.error(format!(
                "no navigation link {index} (page has {})",
                self.links.len()
            ));
        };

        // A resolved target wins over the raw href, which may be a bare `#`.
        let disposition = match (link.request(), &link.href) {
            (Some(request), _) => self.registry.navigate(&request),
            (None, Some(href)) => self.registry.navigate_href(href),
            (None, None) => {
                return self.error(format!("link '{}' has no target", link.label));
            }
        };

        write_event(&mut self.out, &Event::Navigated {
            target: link.target.as_ref(),
            disposition,
        })
    }

    fn write_views(&mut self) -> Result<()> {
        for view in self.registry.views() {
            write_event(&mut self.out, &Event::View(view))?;
        }
        Ok(())
    }

    fn write_changes(&mut self) -> Result<()> {
        let changes = std::mem::take(&mut *self.changes.borrow_mut());
        for change in &changes {
            write_event(&mut self.out, &Event::Changed {
                block: &change.block,
                state: change.state,
            })?;
        }
        Ok(())
    }

    fn write_scrolls(&mut self, fired: &[ScrollRequest]) -> Result<()> {
        for request in fired {
            write_event(&mut self.out, &Event::Scroll {
                block: &request.block,
                behavior: request.behavior,
                align: request.align,
            })?;
        }
        Ok(())
    }

    fn error(&mut self, message: String) -> Result<()> {
        tracing::debug!(%message, "Command rejected");
        write_event(&mut self.out, &Event::Error { message })
    }
}

fn write_event(out: &mut impl Write, event: &Event<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
