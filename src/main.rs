// src/main.rs

//! Command-line entry point: applies a selector to a JSON document and prints the result.

use anyhow::{Context, Result, anyhow};
use jbp_extract::config::{Config, OutputFormat, parse_selector};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, error};

const USAGE: &str = "Usage: jbp-extract [--config FILE] [--selector JSON] [--pretty] [INPUT]";

fn main() {
    if let Err(e) = run_app() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    // Define version information.
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--version") {
        println!("jbp-extract version {VERSION}");
        return Ok(());
    }
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config_path = None;
    let mut selector_arg = None;
    let mut pretty = false;
    let mut input_arg = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path =
                    Some(iter.next().ok_or_else(|| anyhow!("--config flag requires a value"))?);
            }
            "--selector" => {
                selector_arg =
                    Some(iter.next().ok_or_else(|| anyhow!("--selector flag requires a value"))?);
            }
            "--pretty" => pretty = true,
            flag if flag.starts_with("--") => return Err(anyhow!("Unknown flag {flag}\n{USAGE}")),
            path => {
                if input_arg.replace(path).is_some() {
                    return Err(anyhow!("Only one INPUT may be given\n{USAGE}"));
                }
            }
        }
    }

    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if pretty {
        config.output = OutputFormat::Pretty;
    }
    if let Some(path) = input_arg {
        config.input = Some(path.to_string());
    }

    // Initial log level comes from the env var, falling back to the config.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .with_writer(io::stderr)
        .init();

    let selector = match selector_arg {
        Some(text) => parse_selector(text).context("Invalid --selector")?,
        None => config
            .parsed_selector()?
            .ok_or_else(|| anyhow!("No selector given\n{USAGE}"))?,
    };
    debug!("Using selector {} (depth {})", selector, selector.depth());

    let document = read_input(config.input.as_deref())?;
    let extraction = selector.extract(&document);

    let rendered = match config.output {
        OutputFormat::Compact => serde_json::to_string(&extraction)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(&extraction)?,
    };
    println!("{rendered}");
    Ok(())
}

/// Reads and parses the input document from `path`, or stdin when unset.
fn read_input(path: Option<&str>) -> Result<Value> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file at '{path}'"))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            buf
        }
    };
    serde_json::from_str(&contents).map_err(|e| {
        error!("Input is not valid JSON: {}", e);
        anyhow!("Input is not valid JSON: {e}")
    })
}
