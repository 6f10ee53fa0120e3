// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the person signing a declaration.
//
// Every technical error is mapped to a single plain message with a suggestion.
// The pipeline never retries, so nothing here is marked retriable.

use crate::error::{ErrorKind, SignError};

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Failure class the message was derived from.
    pub kind: ErrorKind,
}

/// Convert a `SignError` into a `HumanError` suitable for a single dialog or
/// terminal line.
pub fn humanize_error(err: &SignError) -> HumanError {
    let kind = err.kind();
    match err {
        SignError::InvalidInput(detail) => HumanError {
            message: "Some details are missing.".into(),
            suggestion: format!("Please fill in all fields and try again. ({detail})"),
            kind,
        },

        SignError::AssetNotFound { path } => HumanError {
            message: "A signature image is missing.".into(),
            suggestion: format!(
                "Check that {} exists, or point SIGNATURES_DIR at the folder holding the signatures.",
                path.display()
            ),
            kind,
        },

        SignError::FontRegistration(_) => HumanError {
            message: "The declaration font could not be loaded.".into(),
            suggestion: "Make sure Arial.ttf is next to the program, or set SIGNMYDOC_FONT to a font that supports Hebrew.".into(),
            kind,
        },

        SignError::EmptyDocument => HumanError {
            message: "The selected PDF has no pages.".into(),
            suggestion: "Choose a different declaration file.".into(),
            kind,
        },

        SignError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try opening it in a PDF viewer first, or choose a different file.".into(),
            kind,
        },

        SignError::ImageError(_) => HumanError {
            message: "A signature image could not be processed.".into(),
            suggestion: "The image may be damaged. Re-export the signature as a PNG with a transparent background.".into(),
            kind,
        },

        SignError::Rasterization(detail) => HumanError {
            message: "The PDF pages could not be rendered.".into(),
            suggestion: format!("Check that poppler is installed or POPPLER_PATH is set. ({detail})"),
            kind,
        },

        SignError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    kind,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The program doesn't have permission to use that file or folder.".into(),
                    suggestion: "Close the signed PDF if it is open in a viewer, or choose a different output folder.".into(),
                    kind,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Check that the output folder exists and the disk is not full.".into(),
                    kind,
                }
            }
        }

        SignError::Serialization(_) => HumanError {
            message: "Your saved details could not be read or written.".into(),
            suggestion: "Delete app_data.json and enter your details again.".into(),
            kind,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_mentions_detail() {
        let human = humanize_error(&SignError::InvalidInput("name is empty".into()));
        assert_eq!(human.kind, ErrorKind::InputValidation);
        assert!(human.suggestion.contains("name is empty"));
    }

    #[test]
    fn missing_asset_points_at_signatures_dir() {
        let err = SignError::AssetNotFound {
            path: "sigs/placeholder_signature_2.png".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.kind, ErrorKind::ResourceNotFound);
        assert!(human.suggestion.contains("SIGNATURES_DIR"));
    }

    #[test]
    fn locked_output_is_filesystem() {
        let err = SignError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let human = humanize_error(&err);
        assert_eq!(human.kind, ErrorKind::Filesystem);
    }

    #[test]
    fn rasterization_is_document_processing() {
        let human = humanize_error(&SignError::Rasterization("pdftoppm exited with 99".into()));
        assert_eq!(human.kind, ErrorKind::DocumentProcessing);
    }
}
