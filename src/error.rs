//! Crate-level error type

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LaretError {
    #[error("Config file not found: {path}")]
    #[diagnostic(code(laret::config::not_found))]
    ConfigNotFound { path: PathBuf },

    #[error("Unsupported config format for file: {file}")]
    #[diagnostic(
        code(laret::config::unsupported_format),
        help("Use a .yml, .yaml, .toml or .json file")
    )]
    UnsupportedConfigFormat { file: String },

    #[error("Config loading failed for '{path}': {message}")]
    #[diagnostic(code(laret::config::parse))]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config save failed for '{path}': {message}")]
    #[diagnostic(code(laret::config::save))]
    ConfigSave { path: PathBuf, message: String },

    #[error("Unsupported shell: {0}")]
    #[diagnostic(
        code(laret::completion::unsupported_shell),
        help("Supported shells: bash, zsh, fish, powershell")
    )]
    UnsupportedShell(String),

    #[error("Argument is not valid UTF-8: {0}")]
    #[diagnostic(code(laret::args::invalid_utf8))]
    InvalidArgument(String),

    #[error("Could not determine the home directory")]
    #[diagnostic(code(laret::completion::no_home))]
    NoHomeDirectory,

    #[error("Failed to install logging: {0}")]
    #[diagnostic(code(laret::logging::install))]
    Logging(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(laret::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LaretError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LaretError::UnsupportedShell("tcsh".to_string());
        assert_eq!(err.to_string(), "Unsupported shell: tcsh");

        let err = LaretError::ConfigNotFound {
            path: PathBuf::from("/missing/.laret.yml"),
        };
        assert!(err.to_string().contains("/missing/.laret.yml"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LaretError = io.into();
        assert!(matches!(err, LaretError::Io(_)));
    }
}
