use std::collections::BTreeMap;

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::seed::{SeedTuple, derive_rng};

/// Upper bound on the number of options a grid chart accepts.
pub const MAX_OPTIONS: usize = 16;

/// One labeled cell of an alignment grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
    pub label: String,
}

/// Alignment-chart grid: the first half of the options runs along the columns, the second
/// half along the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    cols: u32,
    rows: u32,
    /// Column-major: all rows of column 0, then column 1, ...
    cells: Vec<GridCell>,
    alignment_key: String,
}

impl GridLayout {
    /// Check the option count without building anything.
    pub fn validate(option_count: usize) -> ForgeResult<()> {
        if option_count == 0 {
            return Err(ForgeError::configuration("need at least two options"));
        }
        if option_count % 2 != 0 {
            return Err(ForgeError::configuration(format!(
                "need an even number of options, got {option_count}"
            )));
        }
        if option_count > MAX_OPTIONS {
            return Err(ForgeError::configuration(format!(
                "at most {MAX_OPTIONS} options are supported, got {option_count}"
            )));
        }
        Ok(())
    }

    pub fn new<S: AsRef<str>>(options: &[S]) -> ForgeResult<Self> {
        Self::validate(options.len())?;
        let axis = options.len() / 2;
        let (xs, ys) = options.split_at(axis);

        let mut cells = Vec::with_capacity(axis * axis);
        for (col, a) in xs.iter().enumerate() {
            for (row, b) in ys.iter().enumerate() {
                let (a, b) = (a.as_ref(), b.as_ref());
                let label = if a == b {
                    format!("true {a}")
                } else {
                    format!("{a} {b}")
                };
                cells.push(GridCell {
                    col: col as u32,
                    row: row as u32,
                    label: label.to_uppercase(),
                });
            }
        }
        let alignment_key = cells.iter().map(|c| c.label.as_str()).collect();

        Ok(Self {
            cols: axis as u32,
            rows: axis as u32,
            cells,
            alignment_key,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, col: u32, row: u32) -> Option<&GridCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get((col * self.rows + row) as usize)
    }

    /// Every cell label concatenated in traversal order; the stable half of each seed.
    pub fn alignment_key(&self) -> &str {
        &self.alignment_key
    }

    /// Cell `(col, row)` for one avatar nonce.
    pub fn place(&self, nonce: u64) -> (u32, u32) {
        let mut rng = derive_rng(
            &SeedTuple::new()
                .with(self.alignment_key.as_str())
                .with(nonce),
        );
        let col = rng.below(self.cols);
        let row = rng.below(self.rows);
        (col, row)
    }

    pub fn assign(&self, nonces: &[u64]) -> GridAssignment {
        let slots: Vec<(u32, u32)> = nonces.iter().map(|&n| self.place(n)).collect();
        let mut buckets: BTreeMap<(u32, u32), Vec<usize>> = BTreeMap::new();
        for (i, slot) in slots.iter().enumerate() {
            buckets.entry(*slot).or_default().push(i);
        }
        tracing::debug!(avatars = slots.len(), occupied = buckets.len(), "grid assignment");
        GridAssignment { slots, buckets }
    }
}

/// Avatar index to cell mapping, built once per render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridAssignment {
    slots: Vec<(u32, u32)>,
    buckets: BTreeMap<(u32, u32), Vec<usize>>,
}

impl GridAssignment {
    /// Cell of each avatar, by input index.
    pub fn slots(&self) -> &[(u32, u32)] {
        &self.slots
    }

    /// Avatar indices in `(col, row)`, in input order.
    pub fn in_cell(&self, col: u32, row: u32) -> &[usize] {
        self.buckets
            .get(&(col, row))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn occupied(&self) -> impl Iterator<Item = ((u32, u32), &[usize])> + '_ {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
