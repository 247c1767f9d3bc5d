/*! Selection index

Projection of the document aligner output onto each side:
a document at position `p` on side `s` participates in at least one alignment iff `p` is in the set of `s`.

Inclusion is purely positional. A document referenced by several rows is still included once.
Negative indices are dropped, they cannot match any manifest position.
!*/
use std::collections::HashSet;

use itertools::Itertools;
use log::{info, warn};

use crate::error::Error;
use crate::io::reader::AlignmentRow;
use crate::side::{PerSide, Side};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionIndex {
    positions: PerSide<HashSet<usize>>,
}

impl SelectionIndex {
    /// Build the index from alignment rows, stopping at the first error.
    pub fn from_rows<I>(rows: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<AlignmentRow, Error>>,
    {
        let mut index = Self::default();
        let mut nb_rows = 0usize;
        let mut nb_negative = 0usize;
        for row in rows {
            nb_negative += index.insert(&row?);
            nb_rows += 1;
        }

        if nb_negative > 0 {
            warn!("{} negative alignment indices ignored", nb_negative);
        }

        info!(
            "{} alignment rows: {} src documents, {} trg documents selected",
            nb_rows,
            index.positions.src.len(),
            index.positions.trg.len()
        );
        Ok(index)
    }

    /// Add both positions of `row`. Returns how many of them were negative, hence skipped.
    pub fn insert(&mut self, row: &AlignmentRow) -> usize {
        let mut skipped = 0;
        for (side, index) in [(Side::Src, row.src_index), (Side::Trg, row.trg_index)] {
            match usize::try_from(index) {
                Ok(position) => {
                    self.positions.get_mut(side).insert(position);
                }
                Err(_) => skipped += 1,
            }
        }
        skipped
    }

    pub fn contains(&self, side: Side, position: usize) -> bool {
        self.positions.get(side).contains(&position)
    }

    pub fn positions(&self, side: Side) -> &HashSet<usize> {
        self.positions.get(side)
    }

    /// Selected positions on `side` that are not below `nb_documents`, sorted.
    ///
    /// Non-empty when the aligner output references documents the manifest does not have.
    pub fn out_of_range(&self, side: Side, nb_documents: usize) -> Vec<usize> {
        self.positions(side)
            .iter()
            .copied()
            .filter(|p| *p >= nb_documents)
            .sorted()
            .collect()
    }
}
