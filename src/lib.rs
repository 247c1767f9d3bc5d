//! # segalign
//!
//! Sentence alignment stage of a parallel corpus mining pipeline.
//!
//! Given a document manifest and the output of a document aligner, segalign rebuilds the
//! sentences of every document that takes part in at least one aligned pair,
//! writes them to intermediate files and runs vecalign over them.
//!
//! The crate can be used both as a tool (see [cli]) or as a lib, in which case
//! [pipelines::Vecalign] and [pipelines::Extract] are the entry points.
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod processing;
pub mod side;
