// ABOUTME: Main application entry point.
// ABOUTME: Reads key combinations from stdin, routes them to layout actions and prints the layout.

mod workspace;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tilewm_core::Config;
use tilewm_input::{Dispatch, HotkeyRouter, KeyCombo};
use tracing_subscriber::EnvFilter;
use workspace::Workspace;

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))
            .with_context(|| format!("Failed to load config from {path}")),
        None => Ok(Config::load_or_default()),
    }
}

fn print_snapshot(out: &mut impl Write, workspace: &Workspace) -> Result<()> {
    serde_json::to_writer(&mut *out, &workspace.snapshot())?;
    writeln!(out)?;
    Ok(())
}

/// Handle one input line; returns false when the session should end
fn handle_line(
    line: &str,
    router: &mut HotkeyRouter,
    workspace: &mut Workspace,
    out: &mut impl Write,
) -> Result<bool> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => return Ok(true),
        Some("quit" | "exit") => return Ok(false),
        Some("show") => {}
        Some("click") => {
            let mut coord = || -> Result<f32> {
                Ok(words.next().context("click needs x and y")?.parse()?)
            };
            match (coord(), coord()) {
                (Ok(x), Ok(y)) => workspace.click(x, y),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("Bad click '{}': {}", line, e);
                    return Ok(true);
                }
            }
        }
        Some(_) => {
            let combo = match KeyCombo::parse(line) {
                Ok(combo) => combo,
                Err(e) => {
                    tracing::error!("{}", e);
                    return Ok(true);
                }
            };

            match router.handle(&combo.to_event()) {
                Dispatch::Handled(action) => {
                    if let Err(e) = workspace.apply(action) {
                        tracing::error!("Action {} failed: {}", action, e);
                    }
                }
                Dispatch::Ignored => {
                    tracing::debug!("No binding for {}", combo);
                    return Ok(true);
                }
            }
        }
    }

    print_snapshot(out, workspace)?;
    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting tilewm");

    let config = load_config()?;
    tracing::info!(
        "Loaded config: default_fraction={}",
        config.layout.default_fraction
    );

    let mut router = HotkeyRouter::from_config(&config.keybindings)?;
    router.on_action(|action, event| {
        tracing::info!("{} ({:?})", action, event.key);
    });
    router.enable();

    let mut workspace = Workspace::with_demo_layout(config.layout.default_fraction)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_snapshot(&mut out, &workspace)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !handle_line(line.trim(), &mut router, &mut workspace, &mut out)? {
            break;
        }
    }

    tracing::info!("Input closed with {} panes, exiting", workspace.layout().len());
    Ok(())
}
