use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// OpenTTD source tree containing objs/setting/table/settings.h
    #[arg(required_unless_present = "header")]
    pub source: Option<PathBuf>,
    /// Settings header to read instead of the one under `source`
    #[arg(long)]
    pub header: Option<PathBuf>,
    /// JSON version table (min_version, max_version, milestones)
    #[arg(long)]
    pub versions: Option<PathBuf>,
    /// Write directives here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Name of the C skip function
    #[arg(long, default_value = "ottd_skip")]
    pub skip_fn: String,
    /// Name of the C file handle
    #[arg(long, default_value = "fp")]
    pub handle: String,
}
