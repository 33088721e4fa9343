use std::ops::{Add, Sub};

/// A cell coordinate, origin at the top left.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        $crate::Pos {
            row: $row,
            col: $col,
        }
    };
}

impl Pos {
    /// clamps both components into `[0, rows) x [0, cols)`.
    pub fn clamp_to(self, rows: usize, cols: usize) -> Self {
        let clamp = |n: i32, max: usize| n.clamp(0, (max as i32 - 1).max(0));
        pos!(clamp(self.row, rows), clamp(self.col, cols))
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.row.saturating_add(rhs.row), self.col.saturating_add(rhs.col))
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.row.saturating_sub(rhs.row), self.col.saturating_sub(rhs.col))
    }
}
