//! Render command - resolve a template, fill it from data and print it

use crate::cli::RenderArgs;
use crate::output::write_rendered;
use anyhow::{Context, Result};
use colored::Colorize;
use dummy_core::config::consts::CONFIG_FILE_NAME;
use dummy_core::{Config, Dummy, MissingFieldPolicy, RenderData};
use std::path::{Path, PathBuf};

/// Render `args.template` to stdout or `args.output`
///
/// Progress lines (with `verbose`) and warnings go to stderr so that stdout
/// only ever carries the rendered text.
pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    let config_path = args.config.clone().or_else(default_config);
    let mut config = match &config_path {
        Some(path) => {
            if verbose {
                eprintln!("{} Using config {}", "→".cyan(), path.display());
            }
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    if let Some(dir) = &args.dir {
        // --dir is relative to the working directory, not to the config
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        config.templates.dir = Some(cwd.join(dir));
    }
    if args.literal_missing {
        config.render.missing_field = MissingFieldPolicy::Literal;
    }

    let anchor = config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut dummy = Dummy::from_config(&config, &anchor)?;

    if verbose {
        if let Some(dir) = dummy.base_directory() {
            eprintln!("{} Template dir {}", "→".cyan(), dir.display());
        }
        eprintln!("{} Resolving {}", "→".cyan(), args.template);
    }
    dummy.parse(&args.template)?;

    let mut data = match &args.data {
        Some(path) => RenderData::from_file(path)?,
        None => RenderData::default(),
    };
    for (key, value) in args.set {
        data.set(key, value);
    }

    let unknown = data.apply(&mut dummy)?;
    for name in &unknown {
        tracing::debug!(loop_name = %name, "data loop has no block in template");
        eprintln!(
            "{} Loop '{}' not found in {}",
            "!".yellow(),
            name,
            args.template
        );
    }

    if verbose {
        let unfilled = dummy.placeholders();
        if !unfilled.is_empty() {
            eprintln!(
                "{} Unfilled placeholders: {}",
                "!".yellow(),
                unfilled.join(", ")
            );
        }
    }

    let rendered = dummy.into_output().unwrap_or_default();
    write_rendered(args.output.as_deref(), &rendered).with_context(|| match &args.output {
        Some(path) => format!("Failed to write {}", path.display()),
        None => "Failed to write to stdout".to_string(),
    })?;

    if verbose {
        if let Some(path) = &args.output {
            eprintln!("{} Wrote {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}

/// `./dummy.toml`, if it exists
fn default_config() -> Option<PathBuf> {
    let path = Path::new(CONFIG_FILE_NAME);
    path.is_file().then(|| path.to_path_buf())
}
