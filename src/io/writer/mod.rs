/*!
# Artifact writing

Intermediate files consumed by the sentence aligner are plain newline-delimited text,
one sentence (or one provenance URL) per line, always ending with a newline.
!*/
mod lines;

pub use lines::write_lines;
