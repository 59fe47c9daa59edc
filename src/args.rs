use clap::Parser;
use std::path::PathBuf;

/// Upload matching files from a directory to a private GitHub gist.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to upload (no upload happens when omitted).
    pub directory: Option<PathBuf>,

    /// Filename suffixes to include.
    #[arg(long, value_name = "SUFFIX", num_args = 1.., default_value = ".rs")]
    pub ext: Vec<String>,

    /// Delete all gists previously created by this tool.
    #[arg(long)]
    pub prune: bool,
}
