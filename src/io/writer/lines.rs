//! Newline-delimited artifact writing.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::error::Error;

/// Write `lines` joined by `\n`, followed by a single trailing newline.
///
/// An empty sequence yields a file holding exactly one empty line,
/// which is what the sentence aligner expects for an empty side.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut w = BufWriter::new(File::create(path)?);
    let mut nb_lines = 0usize;

    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            w.write_all(b"\n")?;
        }
        w.write_all(line.as_ref().as_bytes())?;
        nb_lines += 1;
    }
    w.write_all(b"\n")?;
    w.flush()?;

    debug!("wrote {} lines to {:?}", nb_lines, path);
    Ok(())
}
