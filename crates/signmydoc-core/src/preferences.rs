// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persisted user preferences: the declarant's details and last output folder.
//
// Stored as a flat JSON object. The key names (`id`, `output_folder`) match the
// `app_data.json` files written by earlier releases.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::types::Gender;

/// Default preferences file name, relative to the working directory.
pub const PREFERENCES_FILE: &str = "app_data.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub name: String,
    #[serde(rename = "id")]
    pub identifier: String,
    pub gender: Option<Gender>,
    #[serde(rename = "output_folder")]
    pub output_directory: Option<PathBuf>,
}

impl Preferences {
    /// Load preferences from `path`. A missing file yields empty defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no preferences file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read(path)?;
        let prefs = serde_json::from_slice(&data)?;
        debug!("preferences loaded");
        Ok(prefs)
    }

    /// Overwrite the preferences file (last write wins).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_vec(self)?;
        std::fs::write(path.as_ref(), data)?;
        info!("preferences saved");
        Ok(())
    }
}
