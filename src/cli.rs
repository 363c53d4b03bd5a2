use clap::Parser;
use std::path::PathBuf;

/// Command line of `openduo-generate-models`.
///
/// The launcher itself has no command line: every argument goes to the agent.
#[derive(Parser, Debug)]
#[command(name = "openduo-generate-models")]
#[command(about = "Generate the restricted models catalog for openduo", long_about = None)]
#[command(version = env!("OPENDUO_VERSION"))]
pub struct GenerateModelsCli {
    /// Base URL of the models catalog service (defaults to https://models.dev)
    #[arg(long, env = "MODELS_DEV_URL")]
    pub base_url: Option<String>,

    /// Installation root the catalog is written under
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Compare the existing catalog with upstream instead of writing it
    #[arg(long)]
    pub check: bool,

    /// Show debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
