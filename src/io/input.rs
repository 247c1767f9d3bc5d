/*! Input sources

Both line-oriented inputs (manifest and alignment rows) can come from a file or from the console stream (`-`).
Files ending in `.gz` are transparently decompressed.
!*/
use std::{
    convert::Infallible,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use flate2::read::MultiGzDecoder;
use log::debug;

/// Where a line-oriented input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin)
    }

    /// Open the source for buffered reading.
    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => open_path(path),
        }
    }
}

/// Open a file, decompressing it on the fly if it is gzipped.
pub fn open_path(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let f = File::open(path)?;
    if is_gzip(path) {
        debug!("reading {:?} as gzip", path);
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            f,
        )))))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

impl FromStr for InputSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(InputSource::Stdin)
        } else {
            Ok(InputSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("-"),
            InputSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}
