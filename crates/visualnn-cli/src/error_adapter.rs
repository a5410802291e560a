//! Error adapter for converting VisualNnError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use visualnn::VisualNnError;

/// Adapter rendering a [`VisualNnError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a VisualNnError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            VisualNnError::Io(_) => return None,
            VisualNnError::Config(_) => {
                "check the configuration file; colors are CSS strings such as \"blue\" or \"rgb(128, 0, 128)\""
            }
            VisualNnError::Model(_) => {
                "dense layers need an output size and conv layers a (width, height, channels) shape"
            }
            VisualNnError::Layout(_) => {
                "every layer needs at least one neuron or channel, and mixed networks need a conv layer"
            }
            VisualNnError::InvalidParameter(_) => {
                "the neuron takes three inputs, three weights and at least one frame per edge"
            }
            VisualNnError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`VisualNnError`] into a reportable diagnostic.
pub fn to_reportable(err: &VisualNnError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_display_and_code() {
        let err = VisualNnError::Layout("layer 1 has no neurons".to_string());
        let adapter = to_reportable(&err);

        assert_eq!(adapter.to_string(), "Layout error: layer 1 has no neurons");
        assert_eq!(adapter.code().unwrap().to_string(), "visualnn::layout");
        assert!(adapter.help().is_some());
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = VisualNnError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "visualnn::io");
        assert!(adapter.help().is_none());
        assert!(std::error::Error::source(&adapter).is_some());
    }
}
