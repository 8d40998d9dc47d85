//! Collapsible CLI - drives a block registry over one HTML page.
//!
//! # Event Loop
//!
//! ```text
//! main() -> scan(page) -> Session::start() -> run()
//!                                              |
//!                  stdin line -> Command -> Session::execute()
//!                  16ms tick  -> Session::advance(elapsed)
//!                  EOF / quit -> Session::finish()
//! ```
//!
//! stdout carries one JSON event per line; logs go to stderr.

mod command;
mod session;

use std::fs;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use collapsible_config::CollapsibleConfig;
use collapsible_markup::{scan, scan_fragment};
use collapsible_types::{BlockId, DefaultOpen, RegistryOptions, ScrollDelays};

use crate::command::Command;
use crate::session::{Flow, Session};

const TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "collapsible", version, about)]
struct Cli {
    /// HTML page to scan for blocks.
    page: PathBuf,

    /// Config file (defaults to $COLLAPSIBLE_CONFIG or ~/.collapsible/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block that starts open.
    #[arg(long, conflicts_with = "all_closed")]
    default_open: Option<String>,

    /// Start with every block closed, ignoring the configured default.
    #[arg(long)]
    all_closed: bool,

    /// Opening a block closes the others.
    #[arg(long)]
    exclusive: bool,

    /// Fire scrolls on the next tick instead of after the configured delays.
    #[arg(long)]
    no_delay: bool,

    /// Treat the page as a markup fragment rather than a full document.
    #[arg(long)]
    fragment: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout is the event stream, so logs never go there.
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CollapsibleConfig> {
    if let Some(path) = path {
        return CollapsibleConfig::load_from(path).map_err(Into::into);
    }
    Ok(CollapsibleConfig::load()?.unwrap_or_default())
}

fn registry_options(cli: &Cli, config: &CollapsibleConfig) -> Result<RegistryOptions> {
    let mut options = config.registry_options();

    if cli.all_closed {
        options.default_open = DefaultOpen::None;
    } else if let Some(raw) = &cli.default_open {
        let id = BlockId::new(raw.as_str()).context("--default-open needs a block id")?;
        options.default_open = DefaultOpen::Block(id);
    }
    if cli.exclusive {
        options.exclusive = true;
    }
    if cli.no_delay {
        options.delays = ScrollDelays::immediate();
    }
    Ok(options)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let rules = config.scan_rules();
    let options = registry_options(&cli, &config)?;

    let html = fs::read_to_string(&cli.page)
        .with_context(|| format!("failed to read {}", cli.page.display()))?;
    let page = if cli.fragment {
        scan_fragment(&html, &rules)
    } else {
        scan(&html, &rules)
    }
    .with_context(|| format!("failed to scan {}", cli.page.display()))?;

    tracing::info!(
        page = %cli.page.display(),
        blocks = page.blocks.len(),
        links = page.links.len(),
        "Page scanned"
    );

    let mut session = Session::new(page, options, io::stdout());
    session.start()?;
    run(&mut session).await?;
    session.finish()?;
    Ok(())
}

async fn run(session: &mut Session<Stdout>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticks = tokio::time::interval(TICK);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if session.execute(command)? == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => session.reject(err.to_string())?,
                }
            }
            _ = ticks.tick() => {
                let now = Instant::now();
                session.advance(now.duration_since(last_tick))?;
                last_tick = now;
            }
        }
    }
    Ok(())
}
