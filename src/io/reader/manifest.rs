/*! Document manifest reader

The manifest lists every document considered by the document aligner, one per line:

```text
content_ref<TAB>url<TAB>side
```

Row order is the only addressing mechanism: the n-th `src` row is source document `n`,
the n-th `trg` row is target document `n`.
The reader streams rows and never holds the whole manifest.
!*/
use std::io::{BufRead, Lines};

use crate::error::{Error, FormatError};
use crate::side::Side;

/// One manifest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Path to a sentence file, or base64 content (see [super::content::ContentMode]).
    pub content_ref: String,
    pub url: String,
    pub side: Side,
}

impl DocumentRecord {
    pub fn parse(row: &str, line: usize) -> Result<Self, FormatError> {
        let values: Vec<&str> = row.trim().split('\t').collect();

        if values.len() != 3 {
            return Err(FormatError::ManifestColumns {
                line,
                found: values.len(),
            });
        }

        let side = values[2]
            .parse::<Side>()
            .map_err(|value| FormatError::InvalidSide { line, value })?;

        Ok(Self {
            content_ref: values[0].to_string(),
            url: values[1].to_string(),
            side,
        })
    }
}

/// Iterator over the [DocumentRecord]s of a manifest.
pub struct ManifestReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> ManifestReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for ManifestReader<R> {
    type Item = Result<DocumentRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.lines.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(Error::Io(e))),
        };
        self.line += 1;
        Some(DocumentRecord::parse(&row, self.line).map_err(Error::from))
    }
}
