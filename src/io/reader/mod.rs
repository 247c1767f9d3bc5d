/*! Input readers

- [alignments] reads the document aligner output into [AlignmentRow]s.
- [manifest] streams the document manifest as [DocumentRecord]s.
- [content] turns a document reference into its sentences.

!*/
pub mod alignments;
pub mod content;
pub mod manifest;

pub use alignments::{AlignmentReader, AlignmentRow};
pub use content::ContentMode;
pub use manifest::{DocumentRecord, ManifestReader};
