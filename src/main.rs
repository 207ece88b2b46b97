//! Render markdown files, or stdin, into rich text on stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use markdown_richtext::{Config, MarkdownRenderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Render markdown into rich text", long_about = None)]
struct Cli {
    /// Markdown files to render. Reads stdin when none are given.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// JSON file with rendering settings. Missing settings keep their defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render `^superscript`
    #[arg(long)]
    superscript: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };
    if cli.superscript {
        config.superscript.render_superscript = true;
    }
    let renderer = MarkdownRenderer::with_config(config);

    let mut stdout = io::stdout().lock();
    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        stdout.write_all(renderer.render(&input).as_bytes())?;
    } else {
        for path in &cli.files {
            let input = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            tracing::debug!(path = %path.display(), "rendering file");
            stdout.write_all(renderer.render(&input).as_bytes())?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config `{}`", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("invalid config in `{}`", path.display()))
}
