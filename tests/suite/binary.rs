//! End-to-end runs of the `collapsible` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::common::{KNOWLEDGE_PAGE, write_temp};

const CONFIG: &str = r#"
[behavior]
default_open = "bloco-institucional"
"#;

fn run(config: &Path, page: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_collapsible"))
        .arg("--config")
        .arg(config)
        .args(args)
        .arg(page)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn collapsible");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("write commands");

    child.wait_with_output().expect("wait for collapsible")
}

fn events(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("every stdout line is JSON"))
        .collect()
}

fn of_kind<'a>(events: &'a [Value], kind: &str) -> Vec<&'a Value> {
    events.iter().filter(|e| e["event"] == kind).collect()
}

#[test]
fn announces_page_and_initial_views() {
    let (_config_dir, config) = write_temp("config.toml", CONFIG);
    let (_page_dir, page) = write_temp("page.html", KNOWLEDGE_PAGE);

    let output = run(&config, &page, &[], "");
    assert!(output.status.success(), "{output:?}");

    let events = events(&output);
    assert_eq!(
        events[0],
        json!({"event": "ready", "blocks": 4, "triggers": 3, "skipped": 1, "links": 5})
    );

    let views = of_kind(&events, "view");
    let open: Vec<(&str, &str)> = views
        .iter()
        .map(|v| (v["id"].as_str().unwrap(), v["state"].as_str().unwrap()))
        .collect();
    assert_eq!(open, [
        ("bloco-institucional", "open"),
        ("bloco1", "closed"),
        ("bloco3", "closed"),
        ("bloco-resumo", "closed"),
    ]);
    assert_eq!(views[0]["aria_expanded"], json!(true));
    assert_eq!(views[0]["indicator"]["glyph"], json!("\u{25BC}"));
    assert_eq!(views[1]["indicator"]["glyph"], json!("\u{25B6}"));
    assert_eq!(views[3]["interactive"], json!(false));
}

#[test]
fn commands_report_changes_navigation_and_scrolls() {
    let (_config_dir, config) = write_temp("config.toml", CONFIG);
    let (_page_dir, page) = write_temp("page.html", KNOWLEDGE_PAGE);

    let commands = "\
click bloco1
// comments are ignored
nav #bloco3
link 4
state bloco-removido
click bloco-resumo
fold bloco1
";
    let output = run(&config, &page, &["--no-delay"], commands);
    assert!(output.status.success(), "{output:?}");
    let events = events(&output);

    let changed: Vec<&Value> = of_kind(&events, "changed");
    assert_eq!(changed, [
        &json!({"event": "changed", "block": "bloco1", "state": "open"}),
        &json!({"event": "changed", "block": "bloco3", "state": "open"}),
    ]);

    let navigated = of_kind(&events, "navigated");
    assert_eq!(navigated, [
        &json!({"event": "navigated", "target": "bloco3", "disposition": "prevent_default"}),
        &json!({"event": "navigated", "target": "bloco-removido", "disposition": "prevent_default"}),
    ]);

    assert_eq!(of_kind(&events, "state"), [&json!({
        "event": "state",
        "block": "bloco-removido",
        "state": null
    })]);

    let errors = of_kind(&events, "error");
    assert_eq!(errors.len(), 2);
    assert!(errors[0]["message"].as_str().unwrap().contains("bloco-resumo"));
    assert!(errors[1]["message"].as_str().unwrap().contains("fold"));

    // Ticks may interleave scrolls with command output; only the order and
    // count are fixed.
    let scrolled: Vec<&str> = of_kind(&events, "scroll")
        .iter()
        .map(|e| e["block"].as_str().unwrap())
        .collect();
    assert_eq!(scrolled, ["bloco1", "bloco3"]);
}

#[test]
fn exclusive_flag_closes_previously_open_block() {
    let (_config_dir, config) = write_temp("config.toml", CONFIG);
    let (_page_dir, page) = write_temp("page.html", KNOWLEDGE_PAGE);

    let output = run(&config, &page, &["--exclusive"], "open bloco3\nquit\nopen bloco1\n");
    assert!(output.status.success(), "{output:?}");
    let events = events(&output);

    let changed: Vec<(&str, &str)> = of_kind(&events, "changed")
        .iter()
        .map(|e| (e["block"].as_str().unwrap(), e["state"].as_str().unwrap()))
        .collect();
    assert_eq!(changed, [
        ("bloco-institucional", "closed"),
        ("bloco3", "open")
    ]);
    // Pending scrolls still flush on quit.
    assert_eq!(of_kind(&events, "scroll").len(), 1);
}

#[test]
fn all_closed_overrides_configured_default() {
    let (_config_dir, config) = write_temp("config.toml", CONFIG);
    let (_page_dir, page) = write_temp("page.html", KNOWLEDGE_PAGE);

    let output = run(&config, &page, &["--all-closed"], "state\n");
    assert!(output.status.success(), "{output:?}");
    let events = events(&output);

    let views = of_kind(&events, "view");
    assert_eq!(views.len(), 8);
    assert!(views.iter().all(|v| v["state"] == "closed"));
}

#[test]
fn broken_config_fails_with_path_in_message() {
    let (_config_dir, config) = write_temp("config.toml", "[behavior\n");
    let (_page_dir, page) = write_temp("page.html", KNOWLEDGE_PAGE);

    let output = run(&config, &page, &[], "");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config.toml"), "{stderr}");
}
