// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use the_grafter::backends::KitRegistry;
use the_grafter::config::{
    load_and_validate_config, ConversionDirection, EngineBuilder, EngineParts,
};
use the_grafter::engine::{Conversion, Orchestrator, RunEvent, RunReport, RunTicket};
use the_grafter::tracking::TracingTracker;
use the_grafter::tree::Tree;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 && args[1] == "--list-kits" {
        list_kits(args.get(2).map(String::as_str));
        return Ok(());
    }

    if args.len() != 3 {
        eprintln!("Usage: {} <config.yaml|config.toml> <input.json>", args[0]);
        eprintln!("       {} --list-kits [application]", args[0]);
        eprintln!("Example: {} configs/rhino-native.yaml demos/tree.json", args[0]);
        eprintln!("Example: {} configs/revit-portable.toml demos/native.json", args[0]);
        std::process::exit(1);
    }

    let config = load_and_validate_config(&args[1])
        .with_context(|| format!("loading configuration from {}", args[1]))?;
    let parts = EngineBuilder::from_config(&config)?;
    let input = fs::read_to_string(&args[2]).with_context(|| format!("reading {}", args[2]))?;

    println!("🌳 The Grafter");
    println!("══════════════");
    println!("Config: {}", args[1]);
    println!("Input: {}", args[2]);
    println!(
        "Host: {} (document: {})",
        parts.context.application,
        parts.context.document.as_deref().unwrap_or("none")
    );

    match parts.direction {
        ConversionDirection::ToNative => {
            let (orchestrator, events) = parts.native_orchestrator(Handle::current());
            convert(orchestrator, events, &parts, &input).await
        }
        ConversionDirection::ToPortable => {
            let (orchestrator, events) = parts.portable_orchestrator(Handle::current());
            convert(orchestrator, events, &parts, &input).await
        }
    }
}

/// Restore the node's kit, convert the input tree once and print the result.
async fn convert<C>(
    orchestrator: Orchestrator<C>,
    mut events: UnboundedReceiver<RunEvent<C::Output>>,
    parts: &EngineParts,
    input: &str,
) -> Result<()>
where
    C: Conversion,
    C::Input: DeserializeOwned,
    C::Output: Serialize,
{
    let mut orchestrator = orchestrator.with_tracker(Arc::new(TracingTracker::new("the-grafter")));
    orchestrator.restore_state(&parts.node)?;
    println!(
        "Kit: {} ({} workers)",
        orchestrator.active_kit().unwrap_or("none"),
        orchestrator.worker_count()
    );

    let tree: Tree<C::Input> = serde_json::from_str(input).context("input is not a JSON tree")?;
    let run_id = match orchestrator.run(tree)? {
        RunTicket::Started(run_id) => run_id,
        RunTicket::Skipped => {
            println!("Input has no branches; nothing to convert.");
            return Ok(());
        }
    };

    while let Some(event) = events.recv().await {
        match event {
            RunEvent::Progress { run_id: id, fraction } if id == run_id => {
                eprint!("\r⏳ {:>3.0}%", fraction * 100.0);
                io::stderr().flush()?;
            }
            RunEvent::Done { run_id: id, report } if id == run_id => {
                eprintln!();
                print_report(&report)?;
                break;
            }
            RunEvent::Superseded { run_id: id } if id == run_id => {
                bail!("run {} was superseded before it finished", id);
            }
            _ => {}
        }
    }

    for message in orchestrator.take_messages() {
        eprintln!("⚠️  {}", message);
    }
    println!("\n💾 Node state to persist:");
    println!("{}", orchestrator.save_state().to_yaml()?.trim_end());
    Ok(())
}

fn print_report<O: Serialize>(report: &RunReport<O>) -> Result<()> {
    println!(
        "✅ Run {} with kit {} finished in {:?}",
        report.run_id, report.kit_name, report.duration
    );
    println!(
        "   {} items converted, {} failed",
        report.converted_count(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!("   ❌ {}[{}]: {}", failure.path, failure.index, failure.message);
    }
    println!("\n📤 Output tree:");
    println!("{}", serde_json::to_string_pretty(&report.output)?);
    Ok(())
}

fn list_kits(application: Option<&str>) {
    let registry = KitRegistry::builtin();
    let default = registry.default_kit().ok().map(|kit| kit.name().to_string());
    let kits = match application {
        Some(application) => registry.kits_for_app(application),
        None => registry.list().to_vec(),
    };

    match application {
        Some(application) => println!("Kits for {}:", application),
        None => println!("Installed kits:"),
    }
    for kit in kits {
        let marker = if default.as_deref() == Some(kit.name()) { " (default)" } else { "" };
        println!("  • {}{}: {}", kit.name(), marker, kit.description());
    }
}
