//! vecalign sentence alignment.
//!
//! The [Vecalign] pipeline rebuilds the sentence corpus of aligned documents,
//! writes it in the working directory and hands it to the [Orchestrator].
mod orchestrator;
mod pipeline;
pub mod runner;
mod stage;

pub use orchestrator::{
    AlignerSettings, EmbeddingStrategy, Orchestrator, Step, ALIGN_SCRIPT, EMBED_SCRIPT,
    OVERLAP_SCRIPT,
};
pub use pipeline::Vecalign;
pub use runner::{ProcessRunner, ToolCommand, ToolRunner};
pub use stage::{Stage, State};
