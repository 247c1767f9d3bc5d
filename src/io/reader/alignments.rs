/*! Document aligner output reader

Each row names an aligned source/target document pair by position:

```text
src_index<TAB>trg_index[<TAB>score]
```

Blank rows are skipped, anything else that does not follow this layout is a hard error.
Indices may be padded with spaces and may be negative. A negative index never designates a document.
!*/
use std::io::{BufRead, Lines};

use crate::error::{Error, FormatError};

/// One aligned document pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRow {
    pub src_index: i64,
    pub trg_index: i64,
    /// Kept verbatim, never interpreted here.
    pub score: Option<String>,
}

impl AlignmentRow {
    /// Parse a single (already trimmed, non-empty) row. `line` is used for error reporting.
    pub fn parse(row: &str, line: usize) -> Result<Self, FormatError> {
        let values: Vec<&str> = row.split('\t').collect();

        if !(2..=3).contains(&values.len()) {
            return Err(FormatError::AlignmentColumns {
                line,
                found: values.len(),
            });
        }

        let index = |value: &str| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| FormatError::NonIntegerIndex {
                    line,
                    value: value.to_string(),
                })
        };

        Ok(Self {
            src_index: index(values[0])?,
            trg_index: index(values[1])?,
            score: values.get(2).map(|s| s.to_string()),
        })
    }
}

/// Iterator over [AlignmentRow]s of a line-oriented reader.
pub struct AlignmentReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> AlignmentReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for AlignmentReader<R> {
    type Item = Result<AlignmentRow, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.lines.next()? {
                Ok(row) => row,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            self.line += 1;

            let row = row.trim();
            if row.is_empty() {
                continue;
            }
            return Some(AlignmentRow::parse(row, self.line).map_err(Error::from));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AlignmentReader, AlignmentRow};
    use crate::error::{Error, FormatError};

    #[test]
    fn two_and_three_columns() {
        let r = AlignmentRow::parse("3\t7", 1).unwrap();
        assert_eq!((r.src_index, r.trg_index, r.score), (3, 7, None));

        let r = AlignmentRow::parse("0\t1\t0.87", 1).unwrap();
        assert_eq!(r.score.as_deref(), Some("0.87"));
    }

    #[test]
    fn score_is_not_validated() {
        let r = AlignmentRow::parse("0\t1\tnot-a-score", 1).unwrap();
        assert_eq!(r.score.as_deref(), Some("not-a-score"));
    }

    #[test]
    fn wrong_column_count() {
        assert_eq!(
            AlignmentRow::parse("1", 4),
            Err(FormatError::AlignmentColumns { line: 4, found: 1 })
        );
        assert_eq!(
            AlignmentRow::parse("1\t2\t3\t4", 2),
            Err(FormatError::AlignmentColumns { line: 2, found: 4 })
        );
    }

    #[test]
    fn non_integer_index() {
        assert_eq!(
            AlignmentRow::parse("5\tX", 1),
            Err(FormatError::NonIntegerIndex {
                line: 1,
                value: "X".to_string()
            })
        );
        assert!(matches!(
            AlignmentRow::parse("1.5\t0", 1),
            Err(FormatError::NonIntegerIndex { .. })
        ));
    }

    #[test]
    fn negative_index_is_an_integer() {
        let r = AlignmentRow::parse("-1\t0", 1).unwrap();
        assert_eq!((r.src_index, r.trg_index), (-1, 0));
    }

    #[test]
    fn padded_fields() {
        let r = AlignmentRow::parse("0 \t 1", 1).unwrap();
        assert_eq!((r.src_index, r.trg_index), (0, 1));

        let r = AlignmentRow::parse("2\t 3 \t0.5", 1).unwrap();
        assert_eq!((r.src_index, r.trg_index), (2, 3));
    }

    #[test]
    fn reader_skips_blank_rows_and_counts_lines() {
        let input = "0\t0\n\n  \n1\t0\t0.5\n2\tbad\n";
        let rows: Vec<_> = AlignmentReader::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_ok());
        match &rows[2] {
            Err(Error::Format(FormatError::NonIntegerIndex { line, .. })) => assert_eq!(*line, 5),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reader_trims_rows() {
        let rows: Vec<_> = AlignmentReader::new(" 4\t2 \r\n".as_bytes())
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(rows[0].src_index, 4);
        assert_eq!(rows[0].trg_index, 2);
    }
}
