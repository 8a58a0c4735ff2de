use std::env;
use std::path::Path;

use clap::Parser;

use excerpta::collection::{run_all, run_collection};

mod cli;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = if cli.wants_all() {
        match env::current_dir() {
            Ok(cwd) => run_all(&cwd),
            Err(e) => Err(format!("failed to resolve working directory: {}", e)),
        }
    } else {
        // wants_all() is false only when an explicit path was given.
        let target = cli.collection.as_deref().unwrap_or_default();
        run_collection(Path::new(target))
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
