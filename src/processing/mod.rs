/*! Corpus processing

Turns the document aligner output and the document manifest into the sentence corpus fed to the sentence aligner:

1. [selection] projects alignment rows onto the set of selected document positions per side.
1. [reconstruct] walks the manifest and gathers the sentences (and URLs) of selected documents.
!*/
pub mod reconstruct;
pub mod selection;

pub use reconstruct::{Reconstruction, Reconstructor, SentenceCorpus, SideCorpus};
pub use selection::SelectionIndex;
