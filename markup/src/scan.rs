//! Block and link discovery over a parsed document.

use std::collections::HashSet;

use scraper::{ElementRef, Html};
use serde::Serialize;

use collapsible_types::{BlockId, BlockSpec, IndicatorSlot, NavigationRequest};

use crate::ScanError;
use crate::rules::{CompiledRules, ScanRules};

/// A cross-reference link that opens a block when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    /// Visible text, whitespace collapsed.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// `None` when neither the href nor the target attribute names a block.
    pub target: Option<BlockId>,
}

impl NavigationLink {
    #[must_use]
    pub fn request(&self) -> Option<NavigationRequest> {
        self.target.clone().map(NavigationRequest::new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    /// Blocks in document order.
    pub blocks: Vec<BlockSpec>,
    pub links: Vec<NavigationLink>,
    /// Containers dropped because they had no usable id.
    pub skipped: usize,
}

/// Scans a full HTML document.
pub fn scan(html: &str, rules: &ScanRules) -> Result<PageScan, ScanError> {
    let compiled = CompiledRules::compile(rules)?;
    let document = Html::parse_document(html);
    Ok(scan_document(&document, &compiled, &rules.target_attr))
}

/// Scans a markup fragment, such as a server-rendered partial.
pub fn scan_fragment(html: &str, rules: &ScanRules) -> Result<PageScan, ScanError> {
    let compiled = CompiledRules::compile(rules)?;
    let document = Html::parse_fragment(html);
    Ok(scan_document(&document, &compiled, &rules.target_attr))
}

fn scan_document(document: &Html, rules: &CompiledRules, target_attr: &str) -> PageScan {
    let mut page = PageScan::default();

    for container in containers(document, rules) {
        let Some(id) = container.value().id().and_then(|raw| BlockId::new(raw).ok()) else {
            tracing::debug!("Skipping block container without an id");
            page.skipped += 1;
            continue;
        };

        let trigger = container.select(&rules.trigger).next();
        let indicator_slot = match trigger {
            Some(trigger) if trigger.select(&rules.indicator_slot).next().is_some() => {
                IndicatorSlot::Slot
            }
            _ => IndicatorSlot::Trigger,
        };
        if trigger.is_none() {
            tracing::debug!(block = %id, "Block has no trigger; registering as inert");
        }

        page.blocks.push(BlockSpec {
            id,
            has_trigger: trigger.is_some(),
            indicator_slot,
        });
    }

    if let Some(navigation) = &rules.navigation {
        page.links = document
            .select(navigation)
            .map(|link| navigation_link(link, target_attr))
            .collect();
    }

    tracing::debug!(
        blocks = page.blocks.len(),
        skipped = page.skipped,
        links = page.links.len(),
        "Markup scanned"
    );
    page
}

fn containers<'a>(document: &'a Html, rules: &'a CompiledRules) -> Vec<ElementRef<'a>> {
    let Some(scope) = &rules.scope else {
        return document.select(&rules.container).collect();
    };

    // Nested scopes would otherwise yield the same container twice.
    let mut seen = HashSet::new();
    document
        .select(scope)
        .flat_map(|root| root.select(&rules.container))
        .filter(|container| seen.insert(container.id()))
        .collect()
}

fn navigation_link(link: ElementRef<'_>, target_attr: &str) -> NavigationLink {
    let href = link.value().attr("href").map(str::to_string);
    let target = href
        .as_deref()
        .and_then(NavigationRequest::from_href)
        .map(|request| request.target().clone())
        .or_else(|| {
            link.value()
                .attr(target_attr)
                .and_then(|raw| BlockId::new(raw.trim()).ok())
        });

    NavigationLink {
        label: collapse_whitespace(&link.text().collect::<String>()),
        href,
        target,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
