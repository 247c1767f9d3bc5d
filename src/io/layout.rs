//! Intermediate artifact locations inside the working directory.
use std::path::{Path, PathBuf};

use crate::side::Side;

/// Names the files exchanged with the sentence aligner tools.
///
/// The directory is assumed to be used by a single run at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    dir: PathBuf,
}

impl ArtifactLayout {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, stem: &str, side: Side) -> PathBuf {
        self.dir.join(format!("{}.{}", stem, side))
    }

    /// `sentences.{src,trg}`
    pub fn sentences(&self, side: Side) -> PathBuf {
        self.file("sentences", side)
    }

    /// `urls.{src,trg}`
    pub fn urls(&self, side: Side) -> PathBuf {
        self.file("urls", side)
    }

    /// `overlaps.{src,trg}`
    pub fn overlaps(&self, side: Side) -> PathBuf {
        self.file("overlaps", side)
    }

    /// `overlaps.emb.{src,trg}`
    pub fn embeddings(&self, side: Side) -> PathBuf {
        self.file("overlaps.emb", side)
    }
}
