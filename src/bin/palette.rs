//! Inspect and expand block palettes from the command line.
//!
//! Usage:
//!   palette build --syntax coffeescript
//!   palette build --syntax python --without speech-synthesis
//!   palette expand --context t --file palette.json
//!   palette ids --syntax javascript
//!   palette tables

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use snippet_palette::{
    Capability, CapabilityFlags, Catalog, Palette, Syntax, build_palette, expand,
    load_palette_from_path, read_fragment,
};
use std::io::stdin;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "palette")]
#[command(about = "Build capability-filtered snippet palettes and bind receiver names")]
struct Cli {
    /// Log debug events (dropped blocks, derived ids) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(flatten)]
    capabilities: CapabilityArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CapabilityArgs {
    /// Available capabilities, comma separated; overrides PALETTE_CAPABILITIES.
    #[arg(long, global = true)]
    capabilities: Option<String>,
    /// Treat a capability as unavailable (repeatable).
    #[arg(long, global = true, value_parser = parse_capability)]
    without: Vec<Capability>,
}

impl CapabilityArgs {
    fn resolve(&self) -> Result<CapabilityFlags> {
        let mut flags = match &self.capabilities {
            Some(list) => CapabilityFlags::from_list(list)?,
            None => CapabilityFlags::from_env().context("reading PALETTE_CAPABILITIES")?,
        };
        for capability in &self.without {
            flags = flags.with(*capability, false);
        }
        Ok(flags)
    }
}

fn parse_capability(raw: &str) -> Result<Capability> {
    Capability::try_from(raw)
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a filtered, id-completed palette as JSON.
    Build {
        #[arg(long, default_value = "coffeescript")]
        syntax: String,
        /// Authored palette file to use instead of the bundled one.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Bind a receiver name into a palette fragment read from a file or stdin.
    Expand {
        /// Receiver name; omit to strip the marker.
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List category, id and title of every block in a palette.
    Ids {
        #[arg(long, default_value = "coffeescript")]
        syntax: String,
    },
    /// Print the pass-through lookup tables.
    Tables,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("snippet_palette=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let flags = cli.capabilities.resolve()?;
    match cli.command {
        Command::Build { syntax, file } => {
            let palette = match file {
                Some(path) => build_palette(load_palette_from_path(&path)?, &flags),
                None => {
                    let syntax = Syntax::try_from(syntax.as_str())?;
                    Catalog::build(&flags)?.palette(syntax).clone()
                }
            };
            print_json(&palette)
        }
        Command::Expand { context, file } => {
            let fragment = read_fragment(file.as_deref(), stdin().lock())?;
            print_json(&expand(&fragment, context.as_deref()))
        }
        Command::Ids { syntax } => {
            let syntax = Syntax::try_from(syntax.as_str())?;
            let catalog = Catalog::build(&flags)?;
            print_ids(catalog.palette(syntax));
            Ok(())
        }
        Command::Tables => {
            let catalog = Catalog::build(&flags)?;
            let tables = catalog.tables();
            print_json(&serde_json::json!({
                "known_functions": tables.known_functions,
                "python_functions": tables.python_functions,
                "categories": tables.categories,
                "known_html_tags": tables.known_html_tags,
            }))
        }
    }
}

fn print_ids(palette: &Palette) {
    for (category, block) in palette.blocks() {
        println!(
            "{}\t{}\t{}",
            category.name,
            block.id().unwrap_or_default(),
            block.title
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serializing output JSON")?;
    println!("{rendered}");
    Ok(())
}
