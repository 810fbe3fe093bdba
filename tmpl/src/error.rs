//! Template error types

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors that can occur while building, compiling or executing a template
///
/// The enum is `Clone` so an error raised inside a helper callback can be
/// recovered intact from the render engine's error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("Parse error in {template}{}: {message}", position(.line, .column))]
    Parse {
        template: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Unknown function `{name}` called in {template}")]
    UnknownHelper { template: String, name: String },

    #[error("Template variable `{key}` is unset and no default is provided")]
    UnsetVariable { key: String },

    #[error("Template env variable `{key}` is unset and no default is provided")]
    UnsetEnvironment { key: String },

    #[error("Function `{helper}` expected {expected}, got {found}")]
    TypeMismatch {
        helper: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Function `{helper}` is missing argument {position}")]
    MissingArgument { helper: String, position: usize },

    #[error("Failed to read file {}: {message}", .path.display())]
    FileRead { path: PathBuf, message: String },

    #[error("Unknown time zone `{zone}`")]
    TimeZoneLookup { zone: String },

    #[error("Failed to parse time `{input}` with format `{format}`: {message}")]
    TimeParse {
        input: String,
        format: String,
        message: String,
    },

    #[error("Failed to parse number `{input}`: {message}")]
    NumberParse { input: String, message: String },

    #[error("Failed to parse URL `{input}`: {message}")]
    UrlParse { input: String, message: String },

    #[error("Function `{helper}` could not decode input: {message}")]
    Encoding { helper: String, message: String },

    #[error("Render error in {template}: {message}")]
    Render { template: String, message: String },

    #[error("Failed to write output: {message}")]
    Output { message: String },
}

fn position(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

impl TemplateError {
    /// Errors that a caller can avoid by supplying a default value
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            TemplateError::UnsetVariable { .. } | TemplateError::UnsetEnvironment { .. }
        )
    }

    /// Stable short label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TemplateError::Parse { .. } => "parse",
            TemplateError::UnknownHelper { .. } => "unknown-helper",
            TemplateError::UnsetVariable { .. } => "unset-variable",
            TemplateError::UnsetEnvironment { .. } => "unset-environment",
            TemplateError::TypeMismatch { .. } => "type-mismatch",
            TemplateError::MissingArgument { .. } => "missing-argument",
            TemplateError::FileRead { .. } => "file-read",
            TemplateError::TimeZoneLookup { .. } => "time-zone-lookup",
            TemplateError::TimeParse { .. } => "time-parse",
            TemplateError::NumberParse { .. } => "number-parse",
            TemplateError::UrlParse { .. } => "url-parse",
            TemplateError::Encoding { .. } => "encoding",
            TemplateError::Render { .. } => "render",
            TemplateError::Output { .. } => "output",
        }
    }
}
