//! Plain text patterns: `#` is a live cell, anything else a dead one, one
//! line per row.

use std::{fs, path::Path};

use tracing::debug;

use crate::{pos, Error, Pos, Result};

pub fn parse(text: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for c in text.chars() {
        match c {
            '#' => {
                result.push(pos);
                pos.col += 1
            }
            '\n' => pos = pos!(pos.row + 1, 0),
            '\r' => (),
            _ => pos.col += 1,
        }
    }
    result
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Pos>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let cells = parse(&text);
    if cells.is_empty() {
        return Err(Error::Pattern(format!(
            "{} contains no live cells",
            path.display()
        )));
    }
    debug!(path = %path.display(), cells = cells.len(), "loaded pattern");
    Ok(cells)
}

/// smallest `(rows, cols)` box holding every position.
pub fn extent(cells: &[Pos]) -> (usize, usize) {
    cells.iter().fold((0, 0), |(rows, cols), pos| {
        (
            rows.max(pos.row as usize + 1),
            cols.max(pos.col as usize + 1),
        )
    })
}
