/*! Corpus reconstruction

Walks the document manifest once and gathers, per side, the sentences of every document selected by the [SelectionIndex].

Each side has its own position counter that advances on *every* row of that side, selected or not.
The counter value before the increment is the document position tested against the index.

When URLs are tracked, the document URL is repeated once per produced sentence,
so that `urls.len() == sentences.len()` always holds for each side.
!*/
use std::iter;

use log::{debug, info, warn};

use crate::error::Error;
use crate::io::reader::content::{self, ContentMode};
use crate::io::reader::DocumentRecord;
use crate::io::{write_lines, ArtifactLayout};
use crate::processing::SelectionIndex;
use crate::side::{PerSide, Side};

/// Sentences (and optionally their provenance URLs) of one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideCorpus {
    pub sentences: Vec<String>,
    pub urls: Option<Vec<String>>,
}

impl SideCorpus {
    fn new(with_urls: bool) -> Self {
        Self {
            sentences: Vec::new(),
            urls: with_urls.then(Vec::new),
        }
    }

    fn extend(&mut self, sentences: Vec<String>, url: &str) {
        if let Some(urls) = &mut self.urls {
            urls.extend(iter::repeat(url.to_string()).take(sentences.len()));
        }
        self.sentences.extend(sentences);
    }
}

/// Reconstructed sentence corpus for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceCorpus {
    pub src: SideCorpus,
    pub trg: SideCorpus,
}

impl SentenceCorpus {
    pub fn side(&self, side: Side) -> &SideCorpus {
        match side {
            Side::Src => &self.src,
            Side::Trg => &self.trg,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideCorpus {
        match side {
            Side::Src => &mut self.src,
            Side::Trg => &mut self.trg,
        }
    }

    /// Write `sentences.{src,trg}` and, if tracked, `urls.{src,trg}`.
    pub fn write(&self, layout: &ArtifactLayout) -> Result<(), Error> {
        for side in Side::BOTH {
            let corpus = self.side(side);
            write_lines(&layout.sentences(side), &corpus.sentences)?;
            if let Some(urls) = &corpus.urls {
                write_lines(&layout.urls(side), urls)?;
            }
        }
        Ok(())
    }
}

/// Counters carried along the manifest walk.
#[derive(Debug, Default)]
struct Accumulator {
    /// rows seen so far, per side. Also the position of the next row of that side.
    seen: PerSide<usize>,
    selected: PerSide<usize>,
    corpus: SentenceCorpus,
}

/// Outcome of a reconstruction: the corpus plus per-side document counts.
#[derive(Debug)]
pub struct Reconstruction {
    pub corpus: SentenceCorpus,
    pub documents: PerSide<usize>,
    pub selected: PerSide<usize>,
}

/// Rebuilds the sentence corpus from a manifest, filtered by a [SelectionIndex].
pub struct Reconstructor<'a> {
    selection: &'a SelectionIndex,
    mode: ContentMode,
    with_urls: bool,
}

impl<'a> Reconstructor<'a> {
    pub fn new(selection: &'a SelectionIndex, mode: ContentMode, with_urls: bool) -> Self {
        Self {
            selection,
            mode,
            with_urls,
        }
    }

    /// Consume the manifest rows one at a time. Stops at the first error.
    pub fn run<I>(&self, records: I) -> Result<Reconstruction, Error>
    where
        I: IntoIterator<Item = Result<DocumentRecord, Error>>,
    {
        let init = Accumulator {
            corpus: SentenceCorpus {
                src: SideCorpus::new(self.with_urls),
                trg: SideCorpus::new(self.with_urls),
            },
            ..Default::default()
        };

        let acc = records
            .into_iter()
            .try_fold(init, |acc, record| self.step(acc, record?))?;

        let reconstruction = Reconstruction {
            corpus: acc.corpus,
            documents: acc.seen,
            selected: acc.selected,
        };
        self.report(&reconstruction);
        Ok(reconstruction)
    }

    fn step(&self, mut acc: Accumulator, record: DocumentRecord) -> Result<Accumulator, Error> {
        let side = record.side;
        let position = *acc.seen.get(side);
        *acc.seen.get_mut(side) += 1;

        if self.selection.contains(side, position) {
            let sentences = content::resolve(&record.content_ref, self.mode)?;
            debug!(
                "[{}] document {} selected: {} sentences",
                side,
                position,
                sentences.len()
            );
            acc.corpus.side_mut(side).extend(sentences, &record.url);
            *acc.selected.get_mut(side) += 1;
        }

        Ok(acc)
    }

    fn report(&self, r: &Reconstruction) {
        for side in Side::BOTH {
            info!(
                "[{}] {}/{} documents selected, {} sentences",
                side,
                r.selected.get(side),
                r.documents.get(side),
                r.corpus.side(side).sentences.len()
            );

            let missing = self.selection.out_of_range(side, *r.documents.get(side));
            if !missing.is_empty() {
                warn!(
                    "[{}] {} aligned document indices are beyond the manifest ({} documents): {:?}",
                    side,
                    missing.len(),
                    r.documents.get(side),
                    missing
                );
            }

            if r.corpus.side(side).sentences.is_empty() {
                warn!("[{}] no sentences were reconstructed", side);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose, Engine as _};

    use super::Reconstructor;
    use crate::io::reader::{AlignmentReader, ContentMode, ManifestReader};
    use crate::io::ArtifactLayout;
    use crate::processing::SelectionIndex;
    use crate::side::Side;

    fn b64(s: &str) -> String {
        general_purpose::STANDARD.encode(s)
    }

    fn selection(rows: &str) -> SelectionIndex {
        SelectionIndex::from_rows(AlignmentReader::new(rows.as_bytes())).unwrap()
    }

    #[test]
    fn positions_are_counted_per_side() {
        let manifest = format!(
            "{}\tu0\tsrc\n{}\tv0\ttrg\n{}\tu1\tsrc\n{}\tv1\ttrg\n{}\tu2\tsrc\n",
            b64("s0a\ns0b"),
            b64("t0"),
            b64("s1"),
            b64("t1a\nt1b"),
            b64("s2"),
        );
        let sel = selection("2\t1\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, true)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();

        assert_eq!(r.corpus.src.sentences, vec!["s2"]);
        assert_eq!(r.corpus.trg.sentences, vec!["t1a", "t1b"]);
        assert_eq!(r.corpus.src.urls, Some(vec!["u2".to_string()]));
        assert_eq!(
            r.corpus.trg.urls,
            Some(vec!["v1".to_string(), "v1".to_string()])
        );
        assert_eq!((r.documents.src, r.documents.trg), (3, 2));
        assert_eq!((r.selected.src, r.selected.trg), (1, 1));
    }

    #[test]
    fn identical_documents_are_independent() {
        let doc = b64("same");
        let manifest = format!("{doc}\tu\tsrc\n{doc}\tu\tsrc\n{doc}\tu\tsrc\n");
        let sel = selection("1\t0\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, false)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();
        assert_eq!(r.corpus.src.sentences, vec!["same"]);
        assert_eq!(r.corpus.src.urls, None);
    }

    #[test]
    fn unselected_rows_are_never_resolved() {
        // position 0 is not even base64, but it is not selected
        let manifest = format!("/does/not/exist\tu\tsrc\n{}\tu\tsrc\n", b64("x"));
        let sel = selection("1\t0\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, false)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();
        assert_eq!(r.corpus.src.sentences, vec!["x"]);
    }

    #[test]
    fn invalid_side_aborts() {
        let manifest = format!("{}\tu\tsource\n", b64("x"));
        let sel = selection("0\t0\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, false)
            .run(ManifestReader::new(manifest.as_bytes()));
        assert!(r.is_err());
    }

    #[test]
    fn url_count_matches_sentence_count() {
        let manifest = format!(
            "{}\ta\tsrc\n{}\tb\tsrc\n{}\tc\ttrg\n{}\td\ttrg\n",
            b64("1\n2\n3"),
            b64("\n\n"),
            b64("x\ny"),
            b64("z"),
        );
        let sel = selection("0\t0\n1\t1\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, true)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();
        for side in Side::BOTH {
            let c = r.corpus.side(side);
            assert_eq!(c.urls.as_ref().unwrap().len(), c.sentences.len());
        }
        assert_eq!(r.corpus.src.urls.as_ref().unwrap(), &vec!["a", "a", "a"]);
    }

    #[test_log::test]
    fn indices_beyond_manifest_are_tolerated() {
        let manifest = format!("{}\tu\tsrc\n{}\tv\ttrg\n", b64("a"), b64("b"));
        let sel = selection("0\t0\n12\t40\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, false)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();
        assert_eq!(r.corpus.src.sentences, vec!["a"]);
        assert_eq!(r.corpus.trg.sentences, vec!["b"]);
        assert_eq!(sel.out_of_range(Side::Trg, r.documents.trg), vec![40]);
    }

    #[test]
    fn write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path());
        let manifest = format!("{}\tu\tsrc\n{}\tv\ttrg\n", b64("a\nb"), b64("c"));
        let sel = selection("0\t0\n");
        let r = Reconstructor::new(&sel, ContentMode::Base64, true)
            .run(ManifestReader::new(manifest.as_bytes()))
            .unwrap();
        r.corpus.write(&layout).unwrap();

        let read = |p| std::fs::read_to_string(p).unwrap();
        assert_eq!(read(layout.sentences(Side::Src)), "a\nb\n");
        assert_eq!(read(layout.sentences(Side::Trg)), "c\n");
        assert_eq!(read(layout.urls(Side::Src)), "u\nu\n");
        assert_eq!(read(layout.urls(Side::Trg)), "v\n");
    }

    #[test]
    fn urls_not_written_when_untracked() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ArtifactLayout::new(dir.path());
        let sel = selection("");
        let r = Reconstructor::new(&sel, ContentMode::Base64, false)
            .run(ManifestReader::new("".as_bytes()))
            .unwrap();
        r.corpus.write(&layout).unwrap();
        assert_eq!(
            std::fs::read_to_string(layout.sentences(Side::Src)).unwrap(),
            "\n"
        );
        assert!(!layout.urls(Side::Src).exists());
    }
}
