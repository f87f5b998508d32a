//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("did not find a version tag in {0}, expected \"version\": \"1\"")]
    DidNotFindExpectedVersionTag(PathBuf),
    #[error("unsupported configuration version \"{version}\" in {file_path}, expected \"1\"")]
    UnsupportedVersion { file_path: PathBuf, version: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration in {file_path}: {message}")]
    MissingEnvironmentVariable { file_path: PathBuf, message: String },
    #[error("invalid configuration in {file_path}: {setting}: {message}")]
    InvalidSetting {
        file_path: PathBuf,
        setting: String,
        message: String,
    },
}
