//! Dense, fixed-size cell storage.
//!
//! Rows are laid out back to back in one flat byte buffer. The row stride is
//! the column count rounded up to a power of two, so that addressing is a
//! shift and a mask rather than a multiply and a modulo. Columns past
//! `col_count` are padding and always hold 0.

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    row_count: usize,
    col_count: usize,
    col_power: u32,
    cells: Box<[u8]>,
}

impl Grid {
    pub fn new(row_count: usize, col_count: usize) -> Result<Self> {
        if row_count == 0 || col_count == 0 {
            return Err(Error::InvalidDimensions {
                rows: row_count,
                cols: col_count,
            });
        }

        let too_large = || Error::TooLarge {
            rows: row_count,
            cols: col_count,
        };
        let padded_col_count = col_count.checked_next_power_of_two().ok_or_else(too_large)?;
        let cell_count = row_count
            .checked_mul(padded_col_count)
            .filter(|&count| count <= i32::MAX as usize)
            .ok_or_else(too_large)?;

        Ok(Self {
            row_count,
            col_count,
            col_power: padded_col_count.trailing_zeros(),
            cells: vec![0; cell_count].into_boxed_slice(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn padded_col_count(&self) -> usize {
        1 << self.col_power
    }

    pub fn row_at_index(&self, index: usize) -> usize {
        index >> self.col_power
    }

    pub fn col_at_index(&self, index: usize) -> usize {
        index & (self.padded_col_count() - 1)
    }

    /// flat index of a cell, or `None` when the coordinate is outside the
    /// logical `row_count x col_count` area. Padding is never addressable, so a
    /// column of -1 cannot slide into the previous row.
    #[inline]
    pub fn index_at(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.row_count || col >= self.col_count {
            return None;
        }
        Some((row << self.col_power) + col)
    }

    /// stored value, 0 for anything out of bounds.
    #[inline]
    pub fn value_at(&self, row: i32, col: i32) -> u8 {
        self.index_at(row, col).map_or(0, |index| self.cells[index])
    }

    /// out of bounds writes are dropped.
    pub fn set_value_at(&mut self, row: i32, col: i32, value: u8) {
        if let Some(index) = self.index_at(row, col) {
            self.cells[index] = value;
        }
    }

    pub fn del_value_at(&mut self, row: i32, col: i32) {
        self.set_value_at(row, col, 0);
    }

    pub fn clear_values(&mut self) {
        self.cells.fill(0);
    }

    /// saturates at 255, returns the new value.
    pub fn inc_value_at(&mut self, row: i32, col: i32) -> u8 {
        self.update_at(row, col, |value| value.saturating_add(1))
    }

    /// saturates at 0, returns the new value.
    pub fn dec_value_at(&mut self, row: i32, col: i32) -> u8 {
        self.update_at(row, col, |value| value.saturating_sub(1))
    }

    fn update_at(&mut self, row: i32, col: i32, f: impl FnOnce(u8) -> u8) -> u8 {
        match self.index_at(row, col) {
            Some(index) => {
                let cell = &mut self.cells[index];
                *cell = f(*cell);
                *cell
            }
            None => 0,
        }
    }

    /// the whole backing buffer, padding included.
    pub(crate) fn raw(&self) -> &[u8] {
        &self.cells
    }
}
