/*! Document content resolution

A document is referenced either by a path to a newline-separated sentence file,
or inline as base64-encoded UTF-8 text. Both end up normalized the same way:
lines are trimmed and empty ones are dropped, keeping the original order.
!*/
use std::{
    io::{BufRead, ErrorKind},
    path::Path,
};

use base64::{engine::general_purpose, Engine as _};

use crate::error::Error;
use crate::io::input::open_path;

/// How the first manifest column has to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Path,
    Base64,
}

impl From<bool> for ContentMode {
    /// `true` means base64.
    fn from(is_base64: bool) -> Self {
        if is_base64 {
            ContentMode::Base64
        } else {
            ContentMode::Path
        }
    }
}

/// Get the ordered sentences of a document.
pub fn resolve(content_ref: &str, mode: ContentMode) -> Result<Vec<String>, Error> {
    match mode {
        ContentMode::Base64 => resolve_base64(content_ref),
        ContentMode::Path => resolve_path(Path::new(content_ref)),
    }
}

fn resolve_base64(content: &str) -> Result<Vec<String>, Error> {
    let bytes = general_purpose::STANDARD.decode(content.trim())?;
    let text = String::from_utf8(bytes)?;
    Ok(normalize(text.split('\n')))
}

fn resolve_path(path: &Path) -> Result<Vec<String>, Error> {
    let reader = open_path(path).map_err(|e| not_found(path, e))?;
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidData => {
                Error::Decode(format!("document {:?} is not valid utf-8", path))
            }
            _ => not_found(path, e),
        })?;
    Ok(normalize(lines.iter()))
}

fn not_found(path: &Path, source: std::io::Error) -> Error {
    Error::NotFound {
        path: path.to_path_buf(),
        source,
    }
}

/// Trim each line and drop the empty ones.
pub fn normalize<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect()
}
