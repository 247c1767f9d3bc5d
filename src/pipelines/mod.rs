//! Pipelines.
//!
//! - [Extract] rebuilds the sentence corpus of aligned documents and writes it out.
//! - [Vecalign] does the same, then drives vecalign over it.
//!
//! Both implement the light [pipeline::Pipeline] trait.
mod extract;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod vecalign;

pub use extract::Extract;
pub use pipeline::Pipeline;
pub use vecalign::Vecalign;

use log::info;

use crate::config::Inputs;
use crate::error::Error;
use crate::io::reader::{AlignmentReader, ManifestReader};
use crate::processing::{Reconstruction, Reconstructor, SelectionIndex};

/// Build the selection index from the whole aligner output, then stream the manifest through it.
fn reconstruct(inputs: &Inputs, with_urls: bool) -> Result<Reconstruction, Error> {
    info!("reading document aligner output from {}", inputs.alignments);
    let selection = SelectionIndex::from_rows(AlignmentReader::new(inputs.alignments.open()?))?;

    info!("reading manifest from {}", inputs.manifest);
    let manifest = ManifestReader::new(inputs.manifest.open()?);
    Reconstructor::new(&selection, inputs.content_mode, with_urls).run(manifest)
}
