// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SignMyDoc — stamps a Hebrew declaration and signatures onto a PDF.
//
// Entry point. Initialises logging, parses the command line, and reports
// failures as a single human-readable message.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use signmydoc_core::error::SignError;
use signmydoc_core::human_errors::humanize_error;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("SignMyDoc starting");

    let outcome = match &cli.command {
        Commands::Sign(args) => cli::run_sign(args).map(|path| {
            println!("{}", path.display());
        }),
        Commands::Detect { source } => cli::run_detect(source).map(|category| {
            println!("{}", category);
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &SignError) {
    tracing::error!(error = %err, kind = ?err.kind(), "signing failed");
    let human = humanize_error(err);
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}
