//! Error enum
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::pipelines::vecalign::Stage;

/// Malformed upstream input. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Alignment row with a column count other than 2 or 3.
    #[error("unexpected alignment rows format (line {line}). Expected columns was 3|2, got {found}")]
    AlignmentColumns { line: usize, found: usize },
    /// Alignment row whose first two fields are not integers.
    #[error("could not parse alignment index {value:?} to an integer (line {line})")]
    NonIntegerIndex { line: usize, value: String },
    /// Manifest row with a column count other than 3.
    #[error("unexpected manifest format (line {line}). Expected columns was 3, got {found}")]
    ManifestColumns { line: usize, found: usize },
    /// Manifest row with a side other than `src` or `trg`.
    #[error("unexpected manifest format (line {line}). Expected 3rd column was src|trg, got {value:?}")]
    InvalidSide { line: usize, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("document {path:?} could not be read: {source}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("[{stage}] could not launch external tool: {source}")]
    Launch {
        stage: Stage,
        source: std::io::Error,
    },
    #[error("[{stage}] external tool {}", exit_status(.code))]
    Subprocess { stage: Stage, code: Option<i32> },
    #[error("[{stage}] file {path:?} should exist, but it does not exist")]
    MissingArtifact { stage: Stage, path: PathBuf },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("failed: return code is {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Error {
        Error::Decode(format!("invalid base64 content: {}", e))
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Error {
        Error::Decode(format!("content is not valid utf-8: {}", e))
    }
}
