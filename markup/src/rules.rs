//! Selector conventions for discovering blocks.

use scraper::Selector;

use crate::ScanError;

/// CSS selectors describing how blocks, triggers and links appear in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRules {
    /// Restricts block discovery to descendants of matching elements.
    /// `None` scans the whole document.
    pub scope: Option<String>,
    pub container: String,
    /// Searched among the container's descendants; first match wins.
    pub trigger: String,
    /// Searched inside the trigger; when present the indicator goes there.
    pub indicator_slot: String,
    pub navigation: Vec<String>,
    /// Fallback target attribute for links without a `#fragment` href.
    pub target_attr: String,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            scope: None,
            container: ".form-block".to_string(),
            trigger: ".form-block-header".to_string(),
            indicator_slot: ".form-block-header-right".to_string(),
            navigation: vec![".form-step-pill".to_string(), ".hero-tag".to_string()],
            target_attr: "data-block-target".to_string(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct CompiledRules {
    pub(crate) scope: Option<Selector>,
    pub(crate) container: Selector,
    pub(crate) trigger: Selector,
    pub(crate) indicator_slot: Selector,
    /// All navigation selectors as one list, so matches come back in document
    /// order without duplicates.
    pub(crate) navigation: Option<Selector>,
}

impl CompiledRules {
    pub(crate) fn compile(rules: &ScanRules) -> Result<Self, ScanError> {
        let scope = rules.scope.as_deref().map(parse_selector).transpose()?;

        let mut navigation_parts = Vec::with_capacity(rules.navigation.len());
        for raw in &rules.navigation {
            parse_selector(raw)?;
            navigation_parts.push(raw.trim());
        }
        let navigation = if navigation_parts.is_empty() {
            None
        } else {
            Some(parse_selector(&navigation_parts.join(", "))?)
        };

        Ok(Self {
            scope,
            container: parse_selector(&rules.container)?,
            trigger: parse_selector(&rules.trigger)?,
            indicator_slot: parse_selector(&rules.indicator_slot)?,
            navigation,
        })
    }
}

fn parse_selector(raw: &str) -> Result<Selector, ScanError> {
    Selector::parse(raw).map_err(|err| ScanError::InvalidSelector {
        selector: raw.to_string(),
        reason: err.to_string(),
    })
}
