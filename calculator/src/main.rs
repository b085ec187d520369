//! Command-line front end: reads a form store snapshot and prints the results page

use std::io::Read;

use anyhow::Context;
use fertilizer_calculator::bootstrap;

fn main() -> anyhow::Result<()> {
    let (_config, mut service) = bootstrap()?;

    // Snapshot path as the only argument, stdin otherwise
    let snapshot = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read form store snapshot {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read form store snapshot from stdin")?;
            buffer
        }
    };

    match service.calculate_snapshot(&snapshot) {
        Ok(report) => {
            println!("{}", report.render_text());
            Ok(())
        }
        Err(err) => {
            let response = err.into_response();
            eprintln!("{}", response.error.message);
            std::process::exit(1);
        }
    }
}
