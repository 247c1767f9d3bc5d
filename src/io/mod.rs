/*!
# IO utilities

Line-oriented input reading (manifest, document aligner output, document contents)
and intermediate artifact writing.
!*/
pub mod input;
pub mod layout;
pub mod reader;
pub mod writer;

pub use input::InputSource;
pub use layout::ArtifactLayout;
pub use writer::write_lines;
