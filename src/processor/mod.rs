//! The functional core: classify every table line and fold it into a
//! `SkipTable`.
pub mod accumulator;
pub mod classifier;
pub mod resolver;

pub use accumulator::SkipTable;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::VersionTable;
use classifier::Classifier;
use resolver::VersionResolver;

/// Runs every line of the extracted block through classifier, resolver and
/// accumulator. The first bad line aborts the whole run.
pub fn run(block: &str, versions: &VersionTable) -> Result<SkipTable> {
    let classifier = Classifier::new()?;
    let resolver = VersionResolver::new(versions);
    let mut skips = SkipTable::new();
    let mut descriptors = 0usize;

    for (idx, line) in block.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;

        let field = classifier
            .classify(line)
            .and_then(|d| d.into_field())
            .with_context(|| format!("settings line {lineno}"))?;
        let from = resolver
            .resolve(&field.from)
            .with_context(|| format!("settings line {lineno}"))?;
        let to = resolver
            .resolve(&field.to)
            .with_context(|| format!("settings line {lineno}"))?;

        debug!(
            "line {lineno}: {:?} {} bytes in {from}..={to}",
            field.kind, field.width
        );
        skips
            .add(field.width, from, to)
            .with_context(|| format!("settings line {lineno}"))?;
        descriptors += 1;
    }

    info!(
        "{} descriptors folded into {} version ranges ({} bytes max)",
        descriptors,
        skips.len(),
        skips.total()
    );
    Ok(skips)
}
