pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use config::VersionTable;
use writer::c::EmitOptions;

pub fn run() -> Result<()> {
    let args = cli::Cli::parse();

    let versions = match &args.versions {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            VersionTable::from_json(&json)
                .with_context(|| format!("Parsing version table {}", path.display()))?
        }
        None => VersionTable::default(),
    };

    let header = match (&args.header, &args.source) {
        (Some(header), _) => header.clone(),
        (None, Some(source)) => parser::header_path(source),
        (None, None) => return Err(anyhow!("either a source tree or --header is required")),
    };
    info!("Reading settings from {}", header.display());
    let text = parser::load(&header)?;

    let opts = EmitOptions {
        skip_fn: args.skip_fn.clone(),
        handle: args.handle.clone(),
        ..EmitOptions::default()
    };
    let rendered = generate(&text, &versions, &opts)?;

    // Nothing is written until the whole table generated cleanly.
    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Full pipeline over the text of a settings header: extract, classify and
/// fold, then render the directives.
pub fn generate(header: &str, versions: &VersionTable, opts: &EmitOptions) -> Result<String> {
    // 1. ── Extract ────────────────────────────────────────────────────
    let block = parser::extract_block(header).with_context(|| "Locating settings table")?;
    info!("Settings block is {} bytes", block.len());

    // 2. ── Fold ───────────────────────────────────────────────────────
    let skips = processor::run(block, versions).with_context(|| "Folding settings descriptors")?;

    // 3. ── Emit ───────────────────────────────────────────────────────
    let mut out = Vec::new();
    writer::c::emit(skips, versions.global_range(), opts, &mut out)
        .with_context(|| "Rendering skip directives")?;
    Ok(String::from_utf8(out)?)
}
