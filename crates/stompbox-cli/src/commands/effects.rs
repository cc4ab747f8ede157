//! Effect listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use serde_json::json;
use stompbox_config::EffectKind;
use stompbox_core::ParamDescriptor;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,

    /// Print the parameter schemas as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let kinds: Vec<EffectKind> = match &args.effect {
        Some(name) => vec![name.parse()?],
        None => EffectKind::ALL.to_vec(),
    };

    if args.json {
        let listing: Vec<_> = kinds.iter().map(|&k| schema_json(k)).collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    match kinds.as_slice() {
        [kind] if args.effect.is_some() => print_detail(*kind),
        _ => {
            println!("Available Effects");
            println!("=================");
            println!();
            for kind in &kinds {
                println!("  {:12} - {}", kind.name(), kind.description());
            }
            println!();
            println!("Use 'stompbox effects <name>' for detailed parameter info.");
        }
    }
    Ok(())
}

fn print_detail(kind: EffectKind) {
    println!("{}", kind.name());
    println!("{}", "=".repeat(kind.name().len()));
    println!();
    println!("{}", kind.description());
    println!();

    println!("Parameters (in --values order):");
    println!();
    println!(
        "  {:20}  {:18}  {:10}  {}",
        "Name", "Label", "Default", "Range"
    );
    println!(
        "  {:20}  {:18}  {:10}  {}",
        "----", "-----", "-------", "-----"
    );
    for desc in kind.schema() {
        println!(
            "  {:20}  {:18}  {:10}  {}",
            desc.name,
            desc.label,
            desc.format_value(desc.default),
            range(desc)
        );
    }

    let defaults: Vec<String> = kind.schema().iter().map(|d| d.default.to_string()).collect();
    let first = &kind.schema()[0];
    println!();
    println!("Example usage:");
    println!();
    println!(
        "  stompbox process input.wav --effect {} --param {}={}",
        kind.name(),
        first.name,
        first.default
    );
    println!(
        "  stompbox process input.wav --effect {} --values {}",
        kind.name(),
        defaults.join(",")
    );
}

fn range(desc: &ParamDescriptor) -> String {
    format!("{} to {}", desc.format_value(desc.min), desc.format_value(desc.max))
}

fn schema_json(kind: EffectKind) -> serde_json::Value {
    let params: Vec<_> = kind
        .schema()
        .iter()
        .map(|d| {
            json!({
                "name": d.name,
                "label": d.label,
                "unit": d.unit.suffix().trim(),
                "min": d.min,
                "max": d.max,
                "default": d.default,
            })
        })
        .collect();
    json!({
        "effect": kind.name(),
        "description": kind.description(),
        "mono_output": kind.is_whole_signal(),
        "params": params,
    })
}
