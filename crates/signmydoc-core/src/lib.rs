// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SignMyDoc — Core types, configuration, and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod preferences;
pub mod types;

pub use config::{NotaryDetails, SignerConfig};
pub use error::{ErrorKind, Result, SignError};
pub use preferences::Preferences;
pub use types::*;
