use bitvec::prelude::*;
use std::fmt;

use crate::io::error::{Result, configuration_error};

/// Set of allowed grid cells plus a designated start cell
///
/// Membership is stored one bit per cell in column-major order
/// (`i * rows + j`), matching the grid's `[i, j]` addressing.
/// The start cell is always a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    cols: usize,
    rows: usize,
    allowed: BitVec,
    start: [usize; 2],
}

// All-clear membership bits for a `cols x rows` grid
fn empty_membership(cols: usize, rows: usize) -> Result<BitVec> {
    let Some(len) = cols.checked_mul(rows) else {
        return Err(configuration_error(&format!(
            "mask dimensions {cols}x{rows} overflow the cell count"
        )));
    };
    Ok(bitvec![0; len])
}

impl Mask {
    /// Build a mask from explicit allowed coordinates
    ///
    /// Duplicate coordinates are harmless.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - `cols * rows` overflows
    /// - Any coordinate lies outside `cols x rows`
    /// - No coordinate is selected
    /// - `start` is not one of the selected coordinates
    pub fn new<I>(cols: usize, rows: usize, coordinates: I, start: [usize; 2]) -> Result<Self>
    where
        I: IntoIterator<Item = [usize; 2]>,
    {
        let mut allowed = empty_membership(cols, rows)?;

        for [i, j] in coordinates {
            if i >= cols || j >= rows {
                return Err(configuration_error(&format!(
                    "mask coordinate ({i}, {j}) is outside the {cols}x{rows} grid"
                )));
            }
            allowed.set(i * rows + j, true);
        }

        Self::validated(cols, rows, allowed, start)
    }

    /// Build a mask by evaluating `predicate(i, j)` for every cell
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `cols * rows` overflows, or if the
    /// predicate selects nothing or rejects `start`
    pub fn from_predicate<F>(cols: usize, rows: usize, start: [usize; 2], predicate: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut allowed = empty_membership(cols, rows)?;
        for i in 0..cols {
            for j in 0..rows {
                if predicate(i, j) {
                    allowed.set(i * rows + j, true);
                }
            }
        }

        Self::validated(cols, rows, allowed, start)
    }

    fn validated(cols: usize, rows: usize, allowed: BitVec, start: [usize; 2]) -> Result<Self> {
        if allowed.not_any() {
            return Err(configuration_error(&"mask selects zero cells"));
        }

        let mask = Self {
            cols,
            rows,
            allowed,
            start,
        };

        if !mask.contains(start[0], start[1]) {
            return Err(configuration_error(&format!(
                "start ({}, {}) is not inside the mask",
                start[0], start[1]
            )));
        }

        Ok(mask)
    }

    /// Test whether `(i, j)` is an allowed cell
    ///
    /// Coordinates outside the mask's grid are never allowed.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        if i >= self.cols || j >= self.rows {
            return false;
        }
        self.allowed.get(i * self.rows + j).as_deref() == Some(&true)
    }

    /// Designated start cell
    pub const fn start(&self) -> [usize; 2] {
        self.start
    }

    /// Number of grid columns the mask was built for
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of grid rows the mask was built for
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Count of allowed cells
    pub fn len(&self) -> usize {
        self.allowed.count_ones()
    }

    /// Whether no cell is allowed
    pub fn is_empty(&self) -> bool {
        self.allowed.not_any()
    }

    /// Allowed cells in column-major order
    pub fn positions(&self) -> Vec<[usize; 2]> {
        self.allowed
            .iter_ones()
            .map(|index| [index / self.rows, index % self.rows])
            .collect()
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mask({} of {}x{} cells, start ({}, {}))",
            self.len(),
            self.cols,
            self.rows,
            self.start[0],
            self.start[1]
        )
    }
}
