use console::style;

use crate::gist::{Gist, PruneOutcome};

const WIDTH: usize = 100;

fn rule(ch: &str) {
    println!("{}", ch.repeat(WIDTH));
}

fn heading(title: &str) {
    println!("{title:^WIDTH$}");
}

/// Prints the gist URL and the raw URL of every uploaded file.
pub fn print_gist(gist: &Gist) {
    println!();
    rule("=");
    heading("📂  Gist URL  📂");
    println!();
    println!("{:<10} {}", "🌐 URL:", style(&gist.html_url).green());
    println!();
    rule("-");
    heading("📄  File URLs  📄");
    for (name, file) in &gist.files {
        println!("\n{:<10} {name}", "📁 File:");
        // Raw URLs run long; break them at /raw so the revision hash wraps
        // onto its own line.
        match file.raw_url.split_once("/raw") {
            Some((head, tail)) => {
                println!("{:<10} {head}", "🌐 URL:");
                println!("{}/raw{tail}", " ".repeat(12));
            }
            None => println!("{:<10} {}", "🌐 URL:", file.raw_url),
        }
    }
    rule("=");
    println!();
}

pub fn print_prune(outcome: &PruneOutcome) {
    println!();
    rule("=");
    heading("🌳  Pruned Gists  🌳");
    println!();
    for id in &outcome.deleted {
        println!("     {}   {id}", style("✔").green());
    }
    if !outcome.failed.is_empty() {
        println!();
        rule("-");
        heading("❌  Failed Gists  ❌");
        for id in &outcome.failed {
            println!("     {}   {id}", style("✖").red());
        }
    }
    rule("=");
    println!();
}
