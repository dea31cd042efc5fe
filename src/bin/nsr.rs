//! Command-line interface for nsr
//! This binary parses nsr files and prints the resulting blocks in different formats.
//!
//! Usage:
//!   nsr parse `<path>` [--format `<format>`] [--styles `<a:b>`] [--config `<file>`] [--tab-width `<n>`]
//!   nsr lex `<path>` [--tab-width `<n>`]       - Print the lexer events, one per line
//!   nsr list-formats                          - List all available output formats
//!
//! Logging goes to stderr and is controlled by the `NSR_LOG` environment variable
//! (e.g. `NSR_LOG=nsr=debug`).

use clap::{Parser, Subcommand};
use nsr::nsr::config::{ConfigError, Loader, NsrConfig};
use nsr::nsr::formats::{FormatError, FormatRegistry, TreevizFormatter};
use nsr::nsr::lexing::LineLexer;
use nsr::nsr::pipeline::{parse_with, parse_with_hook, ParseOptions};
use nsr::nsr::styles::{StyleError, StyleMap};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nsr", version, about = "A tool for inspecting and converting nsr files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a file and print its blocks
    Parse {
        /// Path to the nsr file
        path: PathBuf,
        /// Output format (see `list-formats`)
        #[arg(short, long)]
        format: Option<String>,
        /// Style files, separated by ':'
        #[arg(short, long)]
        styles: Option<String>,
        /// Configuration file layered over the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Columns a tab expands to
        #[arg(long)]
        tab_width: Option<usize>,
    },
    /// Print the lexer event stream of a file
    Lex {
        /// Path to the nsr file
        path: PathBuf,
        /// Columns a tab expands to
        #[arg(long)]
        tab_width: Option<usize>,
    },
    /// List available output formats
    ListFormats,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] nsr::nsr::error::Error),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("NSR_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Parse {
            path,
            format,
            styles,
            config,
            tab_width,
        } => handle_parse_command(&path, format, styles, config, tab_width),
        Command::Lex { path, tab_width } => handle_lex_command(&path, tab_width),
        Command::ListFormats => {
            handle_list_formats_command();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(
    config: Option<PathBuf>,
    format: Option<String>,
    tab_width: Option<usize>,
) -> Result<NsrConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = config {
        loader = loader.with_file(path);
    }
    if let Some(format) = format {
        loader = loader.set_override("output.format", format)?;
    }
    if let Some(tab_width) = tab_width {
        loader = loader.set_override("parser.tab_width", tab_width as i64)?;
    }
    loader.build()
}

/// Handle the parse command
fn handle_parse_command(
    path: &Path,
    format: Option<String>,
    styles: Option<String>,
    config: Option<PathBuf>,
    tab_width: Option<usize>,
) -> Result<(), CliError> {
    let config = load_config(config, format, tab_width)?;
    let options = ParseOptions::from(&config.parser);

    let mut style_files = config.styles.files.clone();
    if let Some(styles) = styles {
        style_files.extend(
            styles
                .split(':')
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        );
    }
    let style_map = StyleMap::load_all(&style_files[..])?;

    let source = read_source(path)?;
    let blocks = if style_map.is_empty() {
        parse_with(&source, &options).collect::<Result<Vec<_>, _>>()?
    } else {
        parse_with_hook(&source, &options, style_map).collect::<Result<Vec<_>, _>>()?
    };
    tracing::info!(blocks = blocks.len(), path = %path.display(), "parsed file");

    let mut registry = FormatRegistry::with_defaults();
    if config.output.show_line_numbers {
        registry.register(TreevizFormatter::with_line_numbers(true));
    }
    let output = registry.serialize(&blocks, &config.output.format)?;

    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Handle the lex command
fn handle_lex_command(path: &Path, tab_width: Option<usize>) -> Result<(), CliError> {
    let config = load_config(None, None, tab_width)?;
    let source = read_source(path)?;

    for event in LineLexer::new(&source).with_tab_width(config.parser.tab_width) {
        println!("{}", event?);
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
        }
    }
}
