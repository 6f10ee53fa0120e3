// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and the commands behind them.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::{Args, Parser, Subcommand};
use signmydoc_core::error::{Result, SignError};
use signmydoc_core::preferences::PREFERENCES_FILE;
use signmydoc_core::{DeclarationCategory, DeclarationRequest, Gender, Preferences, SignerConfig};
use signmydoc_document::{detect_category, produce_signed_document};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "signmydoc", version, about = "Sign a Hebrew declaration PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stamp the declaration text and signatures onto a PDF.
    Sign(SignArgs),
    /// Print the category detected for a PDF.
    Detect {
        /// Declaration PDF to inspect.
        source: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct SignArgs {
    /// Declaration PDF to sign.
    pub source: PathBuf,

    /// Declarant's full name. Defaults to the saved preference.
    #[arg(long)]
    pub name: Option<String>,

    /// Declarant's identity number. Defaults to the saved preference.
    #[arg(long = "id")]
    pub identifier: Option<String>,

    /// `male` or `female`.
    #[arg(long, value_parser = parse_gender)]
    pub gender: Option<Gender>,

    /// `company`, `foreigner` or `israeli`. Detected from the PDF when omitted.
    #[arg(long, value_parser = parse_category)]
    pub category: Option<DeclarationCategory>,

    /// Folder for `final_output_with_signature.pdf`.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Preferences file to read defaults from and save to.
    #[arg(long, default_value = PREFERENCES_FILE)]
    pub preferences: PathBuf,

    /// Open the signed PDF when done.
    #[arg(long)]
    pub open: bool,
}

fn parse_gender(value: &str) -> std::result::Result<Gender, String> {
    Ok(Gender::parse_lossy(value))
}

fn parse_category(value: &str) -> std::result::Result<DeclarationCategory, String> {
    Ok(DeclarationCategory::parse_lossy(value))
}

/// Overlay the command-line values on the saved preferences.
pub fn merge_preferences(saved: Preferences, args: &SignArgs) -> Preferences {
    Preferences {
        name: args.name.clone().unwrap_or(saved.name),
        identifier: args.identifier.clone().unwrap_or(saved.identifier),
        gender: args.gender.or(saved.gender),
        output_directory: args.output_dir.clone().or(saved.output_directory),
    }
}

pub fn run_sign(args: &SignArgs) -> Result<PathBuf> {
    let prefs = merge_preferences(Preferences::load(&args.preferences)?, args);
    let gender = prefs
        .gender
        .ok_or_else(|| SignError::InvalidInput("gender not selected".into()))?;

    let category = match args.category {
        Some(category) => category,
        None => detect_category(&args.source)?,
    };

    let request = DeclarationRequest::new(
        prefs.name.clone(),
        prefs.identifier.clone(),
        gender,
        category,
        &args.source,
        prefs.output_directory.clone().unwrap_or_default(),
    );
    request.validate()?;
    prefs.save(&args.preferences)?;

    let output = produce_signed_document(&request, SignerConfig::from_env())?;
    if args.open {
        open_in_viewer(&output);
    }
    Ok(output)
}

pub fn run_detect(source: &Path) -> Result<DeclarationCategory> {
    detect_category(source)
}

/// Hand the file to the desktop's default viewer. Failures are only logged.
fn open_in_viewer(path: &Path) {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    match command.arg(path).spawn() {
        Ok(_) => info!(path = %path.display(), "Opened signed document"),
        Err(err) => warn!(path = %path.display(), %err, "Could not open signed document"),
    }
}
