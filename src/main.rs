use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use gistup::args::Args;
use gistup::collect::collect_files;
use gistup::gist::{GistClient, MARKER};
use gistup::report;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.directory.is_none() && !args.prune {
        return Ok(());
    }

    // The token is read exactly once; both remote steps share the client.
    let client = GistClient::from_env()?;

    if let Some(directory) = &args.directory {
        if let Err(err) = upload(&client, directory, &args.ext) {
            println!("❌ Failed to create a gist: {err}");
        }
    }

    if args.prune {
        match client.prune() {
            Ok(outcome) => report::print_prune(&outcome),
            Err(err) => println!("❌ Failed to fetch gists: {err}"),
        }
    }

    Ok(())
}

fn upload(client: &GistClient, directory: &Path, extensions: &[String]) -> Result<()> {
    let collection = collect_files(directory, extensions)?;
    for (path, err) in &collection.skipped {
        println!("❌ Error reading file: {}. Error: {err}", path.display());
    }

    let cwd = env::current_dir().context("failed to resolve the current directory")?;
    let project = cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("files"));

    let gist = client.create(&format!("{project} {MARKER}"), &collection.files)?;
    report::print_gist(&gist);
    Ok(())
}
