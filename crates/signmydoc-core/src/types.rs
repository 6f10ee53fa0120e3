// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the declaration signing pipeline.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};

/// Date format used inside the declaration text (`DD-MM-YYYY`).
pub const DECLARATION_DATE_FORMAT: &str = "%d-%m-%Y";

/// Grammatical gender of the declarant. Selects the Hebrew vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Parse a gender keyword. Anything other than `female` (case-insensitive)
    /// is treated as male.
    pub fn parse_lossy(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of the source document. Controls where the secondary
/// signature lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationCategory {
    Company,
    Foreigner,
    Israeli,
    /// A category keyword the pipeline does not know. The primary signature is
    /// still placed; the secondary one is skipped.
    Unrecognized,
}

impl DeclarationCategory {
    /// Parse a category keyword (case-insensitive).
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" => Self::Company,
            "foreigner" => Self::Foreigner,
            "israeli" => Self::Israeli,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Foreigner => "foreigner",
            Self::Israeli => "israeli",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for DeclarationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page sizes in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// Target size of the signed output's first page.
    A4,
    /// Canvas size of the generated declaration overlay.
    Letter,
}

impl PageSize {
    /// Dimensions in points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.28, 841.89),
            Self::Letter => (612.0, 792.0),
        }
    }
}

/// Everything needed to produce one signed declaration.
#[derive(Debug, Clone)]
pub struct DeclarationRequest {
    pub name: String,
    pub identifier: String,
    pub gender: Gender,
    pub date: NaiveDate,
    pub category: DeclarationCategory,
    pub source_document_path: PathBuf,
    pub output_directory: PathBuf,
}

impl DeclarationRequest {
    /// Build a request dated today (local time).
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        gender: Gender,
        category: DeclarationCategory,
        source_document_path: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            gender,
            date: Local::now().date_naive(),
            category,
            source_document_path: source_document_path.into(),
            output_directory: output_directory.into(),
        }
    }

    /// Override the declaration date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// The date as it appears in the declaration text.
    pub fn date_string(&self) -> String {
        self.date.format(DECLARATION_DATE_FORMAT).to_string()
    }

    /// Reject requests with empty fields before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SignError::InvalidInput("name is empty".into()));
        }
        if self.identifier.trim().is_empty() {
            return Err(SignError::InvalidInput("identifier is empty".into()));
        }
        if self.source_document_path.as_os_str().is_empty() {
            return Err(SignError::InvalidInput("no declaration file selected".into()));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(SignError::InvalidInput("no output folder selected".into()));
        }
        Ok(())
    }
}
