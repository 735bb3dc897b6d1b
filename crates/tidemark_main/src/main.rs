mod cli;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tidemark_stream::MarkdownWriter;
use tracing::debug;

use crate::cli::Cli;

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.render_options();
    debug!(width = options.console_width, colors = options.enable_colors, "rendering");

    let stdout = io::stdout();
    let sink = BufWriter::new(stdout.lock());
    let mut writer = MarkdownWriter::with_options(sink, options);

    match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            stream(BufReader::new(file), &mut writer)?;
        }
        None => stream(io::stdin().lock(), &mut writer)?,
    }

    writer.complete()?;
    Ok(())
}

/// Feed the reader through the renderer line by line, flushing after
/// each line so output appears as the input arrives.
fn stream<R: BufRead, W: Write>(mut reader: R, writer: &mut MarkdownWriter<W>) -> Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).context("cannot read input")? == 0 {
            break;
        }
        writer.write_str(&line)?;
        writer.flush()?;
    }
    Ok(())
}
