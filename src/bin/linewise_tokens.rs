//! Diagnostic: print how each line of an input file splits into tokens.
//!
//! Usage: `linewise-tokens <file> [separator-regex] [encoding-label]`

use anyhow::{bail, Context as _, Result};
use linewise::ParserConfig;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        if args.len() < 2 {
            std::process::exit(1);
        }
        return Ok(());
    }

    let path = Path::new(&args[1]);
    if !path.is_file() {
        bail!("input must be a file: {}", path.display());
    }

    let mut config = ParserConfig::default();
    if let Some(separator) = args.get(2) {
        config = config
            .with_separator(separator)
            .with_context(|| format!("invalid separator {:?}", separator))?;
    }
    if let Some(label) = args.get(3) {
        config = config.with_encoding_label(label);
    }

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = config.decode(&bytes);

    let mut lines = 0;
    let mut tokens = 0;
    for (index, line) in text.lines().enumerate() {
        let values = config.split(line);
        println!("{:>6} [{}] {:?}", index + 1, values.len(), values);
        lines += 1;
        tokens += values.len();
    }

    println!("\n{lines} line(s), {tokens} token(s)");
    Ok(())
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file> [separator-regex] [encoding-label]", program_name);
    eprintln!("       {} --help", program_name);
}
