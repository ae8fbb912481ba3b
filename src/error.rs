use std::path::PathBuf;

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CoordError {
    #[error("environment variable not set: {}", .0.join(", "))]
    #[diagnostic(help("set each variable, or pass the matching command-line flag"))]
    MissingSettings(Vec<String>),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("cannot open file: {path}: {message}")]
    OpenInput { path: Utf8PathBuf, message: String },

    #[error("cannot open file: {path}: {message}")]
    OpenOutput { path: Utf8PathBuf, message: String },

    #[error("malformed input document: {0}")]
    MalformedInput(String),

    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("registry snapshot line {line}: {message}")]
    RegistryParse { line: usize, message: String },

    #[error("failed to write {path}: {message}")]
    Write { path: Utf8PathBuf, message: String },

    #[error("invalid external gene id: {0:?}")]
    InvalidExternalId(String),
}
