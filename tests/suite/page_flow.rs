//! Scan -> registry -> navigation flows over a realistic page.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use collapsible_config::CollapsibleConfig;
use collapsible_core::Registry;
use collapsible_markup::{ScanRules, scan};
use collapsible_types::{
    BlockId, BlockState, Disposition, IndicatorSlot, RegistryOptions, ScrollRequest,
};

use crate::common::{KNOWLEDGE_PAGE, write_temp};

fn institucional_open() -> RegistryOptions {
    RegistryOptions::default().with_default_open(BlockId::new("bloco-institucional").unwrap())
}

fn knowledge_registry(options: RegistryOptions) -> Registry {
    let page = scan(KNOWLEDGE_PAGE, &ScanRules::default()).expect("default rules are valid");
    Registry::new(page.blocks, options)
}

fn fire_all(registry: &mut Registry, delta: Duration) -> Vec<String> {
    let mut fired = Vec::new();
    registry.advance(delta, &mut |request: &ScrollRequest| {
        fired.push(request.block.to_string());
    });
    fired
}

#[test]
fn scan_registers_only_blocks_with_ids() {
    let page = scan(KNOWLEDGE_PAGE, &ScanRules::default()).unwrap();
    let ids: Vec<&str> = page.blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, [
        "bloco-institucional",
        "bloco1",
        "bloco3",
        "bloco-resumo"
    ]);
    assert_eq!(page.skipped, 1);
    assert_eq!(page.blocks[0].indicator_slot, IndicatorSlot::Slot);
    assert!(!page.blocks[3].has_trigger);
    assert_eq!(page.links.len(), 5);
}

#[test]
fn initial_state_follows_default_rule() {
    let registry = knowledge_registry(institucional_open());
    assert_eq!(registry.is_open("bloco-institucional"), Some(true));
    for closed in ["bloco1", "bloco3", "bloco-resumo"] {
        assert_eq!(registry.is_open(closed), Some(false), "{closed}");
    }

    let all_closed = knowledge_registry(RegistryOptions::default());
    assert!(all_closed.ids().all(|id| all_closed.is_open(id) == Some(false)));
}

#[test]
fn hero_tag_opens_block_and_scrolls_after_navigation_delay() {
    let mut registry = knowledge_registry(institucional_open());
    let page = scan(KNOWLEDGE_PAGE, &ScanRules::default()).unwrap();

    let request = page.links[1].request().expect("hero tag targets bloco3");
    assert_eq!(registry.navigate(&request), Disposition::PreventDefault);
    assert_eq!(registry.is_open("bloco3"), Some(true));
    assert_eq!(registry.pending_scrolls(), 1);

    assert!(fire_all(&mut registry, Duration::from_millis(99)).is_empty());
    assert_eq!(fire_all(&mut registry, Duration::from_millis(1)), ["bloco3"]);
}

#[test]
fn stale_pill_is_swallowed_without_side_effects() {
    let mut registry = knowledge_registry(institucional_open());
    let before: Vec<Option<bool>> = registry.ids().map(|id| registry.is_open(id)).collect();

    assert_eq!(
        registry.navigate_href("#bloco-removido"),
        Disposition::PreventDefault
    );

    let after: Vec<Option<bool>> = registry.ids().map(|id| registry.is_open(id)).collect();
    assert_eq!(before, after);
    assert_eq!(registry.is_open("bloco-removido"), None);
    assert_eq!(registry.pending_scrolls(), 0);
}

#[test]
fn header_click_cycle_with_listener() {
    let mut registry = knowledge_registry(institucional_open());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    registry.on_change(move |change| {
        sink.borrow_mut()
            .push((change.block.to_string(), change.state));
    });

    let header = registry.trigger_for("bloco1").expect("bloco1 has a header");
    registry.activate(header);
    registry.activate(header);

    assert_eq!(registry.is_open("bloco1"), Some(false));
    assert_eq!(seen.borrow().as_slice(), [
        ("bloco1".to_string(), BlockState::Open),
        ("bloco1".to_string(), BlockState::Closed),
    ]);
    // The scroll from the first click still fires.
    assert_eq!(fire_all(&mut registry, Duration::from_millis(300)), ["bloco1"]);
}

#[test]
fn headerless_block_reachable_only_by_navigation() {
    let mut registry = knowledge_registry(RegistryOptions::default());
    assert_eq!(registry.trigger_for("bloco-resumo"), None);

    registry.navigate_href("#bloco-resumo");
    assert_eq!(registry.is_open("bloco-resumo"), Some(true));
    let view = registry.view("bloco-resumo").unwrap();
    assert!(!view.interactive);
    assert_eq!(view.classes, ["accordion-block", "accordion-open"]);
}

#[test]
fn config_file_drives_scan_and_registry() {
    let (_dir, path) = write_temp(
        "config.toml",
        r#"
[scan]
navigation = [".hero-tag"]

[behavior]
default_open = "bloco1"
exclusive = true

[scroll]
navigation_delay_ms = 0
"#,
    );
    let config = CollapsibleConfig::load_from(&path).unwrap();
    let page = scan(KNOWLEDGE_PAGE, &config.scan_rules()).unwrap();
    assert_eq!(page.links.len(), 2);

    let mut registry = Registry::new(page.blocks, config.registry_options());
    assert_eq!(registry.is_open("bloco1"), Some(true));

    registry.navigate_href("#bloco3");
    assert_eq!(registry.is_open("bloco1"), Some(false));
    assert_eq!(registry.is_open("bloco3"), Some(true));
    assert_eq!(fire_all(&mut registry, Duration::ZERO), ["bloco3"]);
}
