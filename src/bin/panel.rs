//! Desktop host for the throttle panel.
//!
//! Stands in for the command station: reads one message per line from
//! stdin in the `<U 2 3986>` text form, runs the inbound filter, and draws
//! handled rows on a terminal-rendered LCD. Declined messages are logged
//! and otherwise ignored, as the command station's default handling would
//! take them.
//!
//! # Usage
//!
//! ```bash
//! # Built-in roster
//! cargo run --features host --bin throttle-panel
//!
//! # Roster from a JSON document, panel settings from a JSON config
//! cargo run --features host --bin throttle-panel -- roster.json config.json
//!
//! # More detail on declined messages
//! RUST_LOG=debug cargo run --features host --bin throttle-panel
//! ```

use anyhow::{anyhow, Context};
use std::io::{self, BufRead};
use throttle_panel::hal::ConsoleLcd;
use throttle_panel::{
    automation, parse_roster_document, roster, CharacterDisplay, Config, InboundEvent,
    InboundFilter, Roster,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let roster_path = args.next();
    let config_path = args.next();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str::<Config>(&text)
                .with_context(|| format!("parsing config {path}"))?
        }
        None => Config::default(),
    };

    // =========================================================================
    // Roster (installed once, read-only afterwards)
    // =========================================================================
    let table = match roster_path {
        Some(path) => load_roster(&path)?,
        None => Roster::layout().context("building built-in roster")?,
    };
    let table = roster::install(table).context("installing roster")?;
    tracing::info!(
        entries = table.len(),
        default = ?table.default_id(),
        "roster installed"
    );
    for entry in table.entries() {
        tracing::debug!(
            id = entry.id(),
            label = entry.label().as_str(),
            functions = entry.function_list(),
            "roster entry"
        );
    }

    // =========================================================================
    // Startup automation (declared here, run by the command station)
    // =========================================================================
    automation::validate(&automation::STARTUP).context("startup automation")?;
    for sequence in &automation::STARTUP {
        tracing::info!(
            trigger = ?sequence.trigger,
            steps = sequence.steps.len(),
            "automation sequence declared"
        );
    }

    // =========================================================================
    // Message loop
    // =========================================================================
    let filter = InboundFilter::with_config(table, &config.filter);
    let mut lcd = ConsoleLcd::new(io::stdout(), &config.display);
    lcd.clear().context("clearing display")?;
    lcd.present().context("drawing display")?;
    tracing::info!(device = %config.device.name, "panel ready");

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(event) = InboundEvent::parse(&line) else {
            tracing::warn!(input = %line.trim(), "unparseable message");
            continue;
        };

        let verdict = filter
            .dispatch(&event, &mut lcd)
            .context("writing to display")?;
        if let Some(reason) = verdict.reason() {
            tracing::info!(input = %line.trim(), ?reason, "passed to default handling");
        }
    }

    Ok(())
}

fn load_roster(path: &str) -> anyhow::Result<Roster> {
    let bytes = std::fs::read(path).with_context(|| format!("reading roster {path}"))?;
    let doc = parse_roster_document(&bytes)
        .ok_or_else(|| anyhow!("roster {path} is not a valid roster document"))?;
    Roster::from_document(&doc).with_context(|| format!("validating roster {path}"))
}
