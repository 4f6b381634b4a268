//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dummy")]
#[command(version, about = "Render {load}/{loop} text templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a template, fill it and print the result
    Render(RenderArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Template file name, relative to the template directory
    pub template: String,

    /// Template directory (overrides `templates.dir` from the config)
    #[arg(short, long, env = "DUMMY_TEMPLATE_DIR")]
    pub dir: Option<PathBuf>,

    /// Config file [default: ./dummy.toml when present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// TOML or JSON file with variables and loop records
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Set a variable, applied after the data file
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep `{:field}` in the output when a record lacks the field
    #[arg(long)]
    pub literal_missing: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }

    Ok((key.to_string(), value.to_string()))
}
