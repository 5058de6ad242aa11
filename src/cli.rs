use std::path::PathBuf;

use clap::Parser;

use harvest_summarizer::models::Coordinates;
use harvest_summarizer::Tool;

#[derive(Parser, Debug)]
#[command(
    name = "harvest-summarizer",
    about = "Summarize harvested package metadata and license scans into definition fragments",
    version
)]
pub struct Cli {
    /// Harvested tool output(s) to summarize (JSON)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Package coordinates: type/provider/namespace/name/revision (`-` for no namespace)
    #[arg(short, long)]
    pub coordinates: Coordinates,

    /// Tool that produced the input
    #[arg(long, default_value = "clearlydefined", value_name = "TOOL")]
    pub tool: ToolArg,

    /// Config file [default: ./.harvest-summarizer/config.toml, fallback ~/.config/harvest-summarizer/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not group scan results into facets (scan summaries come back empty)
    #[arg(long)]
    pub no_facets: bool,

    /// Report format
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ToolArg {
    #[value(name = "clearlydefined")]
    ClearlyDefined,
    #[value(name = "scancode")]
    ScanCode,
}

impl From<ToolArg> for Tool {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::ClearlyDefined => Tool::ClearlyDefined,
            ToolArg::ScanCode => Tool::ScanCode,
        }
    }
}
