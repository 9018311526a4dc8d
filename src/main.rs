//! Command-line driver: parse one script and print its tree.

mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bumpalo::Bump;
use clap::Parser;
use ink::{DEFAULT_MAX_DEPTH, ParseOptions, Source};

#[derive(Parser)]
#[command(name = "ink", version, about = "Parse an ink script and dump its syntax tree")]
struct Cli {
    /// Log every rule entry, context change, rewind, and node creation.
    #[arg(long)]
    trace: bool,

    /// Ceiling for brace, expression, and choice nesting.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Script to parse.
    file: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.trace {
        logger::init(log::LevelFilter::Trace);
    }

    let source = Source::load(&cli.file)
        .with_context(|| format!("failed to load `{}`", cli.file.display()))?;
    println!(
        "Source file {} is {} bytes",
        source.path().display(),
        source.len()
    );

    let options = ParseOptions::default()
        .with_max_depth(cli.max_depth)
        .with_trace(cli.trace);
    let arena = Bump::new();
    let tree = ink::parse(source.bytes(), &arena, &options)
        .with_context(|| format!("failed to parse `{}`", cli.file.display()))?;

    print!("{}", tree.dump());

    if !tree.has_errors() {
        return Ok(ExitCode::SUCCESS);
    }
    for error in tree.errors() {
        eprintln!("{}", error.display_with_source(source.bytes()));
    }
    eprintln!("{} error(s) in {}", tree.errors().len(), source.path().display());
    Ok(ExitCode::FAILURE)
}
