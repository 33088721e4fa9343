//! Double-buffered simulation of a bounded life-like automaton.
//!
//! A cell's stored value is its state: 0 is dead, anything else is alive and
//! holds the live neighbor count the cell had when it was born or last
//! survived. Rules only look at whether a neighbor is alive.

use std::{hash::Hasher, mem};

use metrohash::MetroHash64;
use tracing::{debug, trace};

use crate::{Grid, Pos, Result};

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Birth and survival thresholds, in live neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// lowest count at which a live cell survives.
    pub min_neighbors: u8,
    /// highest count at which a live cell survives.
    pub max_neighbors: u8,
    /// exact count at which a dead cell is born.
    pub spawn_neighbors: u8,
}

impl Rules {
    pub fn new(min_neighbors: u8, max_neighbors: u8, spawn_neighbors: u8) -> Self {
        Self {
            min_neighbors,
            max_neighbors,
            spawn_neighbors,
        }
    }

    /// whether a cell is alive next turn given its own liveness and its
    /// live neighbor count.
    pub fn is_alive_next(&self, alive: bool, neighbor_count: u8) -> bool {
        if alive {
            (self.min_neighbors..=self.max_neighbors).contains(&neighbor_count)
        } else {
            neighbor_count == self.spawn_neighbors
        }
    }
}

impl Default for Rules {
    /// B3/S23
    fn default() -> Self {
        Self::new(2, 3, 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldOptions {
    pub row_count: usize,
    pub col_count: usize,
    pub rules: Rules,
}

impl WorldOptions {
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self {
            row_count,
            col_count,
            rules: Rules::default(),
        }
    }

    pub fn with_row_count(self, row_count: usize) -> Self {
        Self { row_count, ..self }
    }

    pub fn with_col_count(self, col_count: usize) -> Self {
        Self { col_count, ..self }
    }

    pub fn with_rules(self, rules: Rules) -> Self {
        Self { rules, ..self }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    rules: Rules,
    generation: u64,
    current: Grid,
    next: Grid,
}

impl World {
    pub fn new(options: WorldOptions) -> Result<Self> {
        let WorldOptions {
            row_count,
            col_count,
            rules,
        } = options;
        let current = Grid::new(row_count, col_count)?;
        let next = Grid::new(row_count, col_count)?;
        debug!(row_count, col_count, ?rules, "created world");
        Ok(Self {
            rules,
            generation: 0,
            current,
            next,
        })
    }

    pub fn row_count(&self) -> usize {
        self.current.row_count()
    }

    pub fn col_count(&self) -> usize {
        self.current.col_count()
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn min_neighbors(&self) -> u8 {
        self.rules.min_neighbors
    }

    pub fn max_neighbors(&self) -> u8 {
        self.rules.max_neighbors
    }

    pub fn spawn_neighbors(&self) -> u8 {
        self.rules.spawn_neighbors
    }

    pub fn options(&self) -> WorldOptions {
        WorldOptions {
            row_count: self.row_count(),
            col_count: self.col_count(),
            rules: self.rules,
        }
    }

    /// number of generations adopted since creation or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_value_at(&self, row: i32, col: i32) -> u8 {
        self.current.value_at(row, col)
    }

    pub fn live_neighbor_count_at(&self, row: i32, col: i32) -> u8 {
        live_neighbor_count(&self.current, row, col)
    }

    /// value the cell takes next generation. `current_value` overrides the
    /// stored value of the cell itself, not of its neighbors.
    pub fn next_value_at(&self, row: i32, col: i32, current_value: Option<u8>) -> u8 {
        next_value(&self.rules, &self.current, row, col, current_value)
    }

    pub fn populate_next_grid(&mut self) {
        for row in 0..self.row_count() as i32 {
            for col in 0..self.col_count() as i32 {
                let value = next_value(&self.rules, &self.current, row, col, None);
                self.next.set_value_at(row, col, value);
            }
        }
    }

    pub fn adopt_next_grid(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        trace!(generation = self.generation, "adopted next grid");
    }

    pub fn step_forward(&mut self) {
        self.populate_next_grid();
        self.adopt_next_grid();
    }

    pub fn is_alive_at(&self, row: i32, col: i32) -> bool {
        self.current_value_at(row, col) > 0
    }

    /// flips the cell between dead and 1, returns the new value.
    pub fn toggle_at(&mut self, row: i32, col: i32) -> u8 {
        let value = if self.is_alive_at(row, col) { 0 } else { 1 };
        self.current.set_value_at(row, col, value);
        self.current_value_at(row, col)
    }

    pub fn spawn_at(&mut self, row: i32, col: i32) -> u8 {
        self.current.set_value_at(row, col, 1);
        self.current_value_at(row, col)
    }

    pub fn kill_at(&mut self, row: i32, col: i32) -> u8 {
        self.current.del_value_at(row, col);
        0
    }

    /// spawns every position shifted by `offset`, dropping what falls outside.
    pub fn spawn_all(&mut self, positions: impl IntoIterator<Item = Pos>, offset: Pos) {
        for pos in positions {
            let Pos { row, col } = pos + offset;
            self.spawn_at(row, col);
        }
    }

    pub fn reset(&mut self) {
        self.current.clear_values();
        self.next.clear_values();
        self.generation = 0;
    }

    /// visits every cell of the current generation in row-major order.
    pub fn iterate(&self, mut visit: impl FnMut(i32, i32, u8)) {
        for row in 0..self.row_count() as i32 {
            for col in 0..self.col_count() as i32 {
                visit(row, col, self.current.value_at(row, col));
            }
        }
    }

    /// Visits every cell with both its current and next value while filling
    /// the next grid, then adopts it. Equivalent to [`World::iterate`]
    /// followed by [`World::step_forward`], in a single pass.
    pub fn iterate_and_step_forward(&mut self, mut visit: impl FnMut(i32, i32, u8, u8)) {
        let Self {
            rules,
            current,
            next,
            ..
        } = self;
        for row in 0..current.row_count() as i32 {
            for col in 0..current.col_count() as i32 {
                let current_value = current.value_at(row, col);
                let new_value = next_value(rules, current, row, col, Some(current_value));
                next.set_value_at(row, col, new_value);
                visit(row, col, current_value, new_value);
            }
        }
        self.adopt_next_grid();
    }

    /// Builds a new world from `options` and copies the current generation
    /// into it. Cells outside the new dimensions are dropped; cells the new
    /// world has but this one lacks start dead. `self` is left untouched.
    pub fn split_timeline(&self, options: WorldOptions) -> Result<World> {
        let mut world = World::new(options)?;
        world.generation = self.generation;

        let mut dropped = 0usize;
        self.iterate(|row, col, value| match world.current.index_at(row, col) {
            Some(_) => world.current.set_value_at(row, col, value),
            None => dropped += usize::from(value > 0),
        });

        debug!(
            from_rows = self.row_count(),
            from_cols = self.col_count(),
            to_rows = world.row_count(),
            to_cols = world.col_count(),
            dropped,
            "split timeline"
        );
        Ok(world)
    }

    /// number of live cells in the current generation.
    pub fn population(&self) -> usize {
        // padding is never writable, so it only ever adds zeros
        self.current.raw().iter().filter(|&&value| value > 0).count()
    }

    /// Hash of which cells are alive in the current generation. Stored
    /// neighbor counts are ignored, so an oscillator hashes the same every
    /// time it comes back to the same shape.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        hasher.write_usize(self.row_count());
        hasher.write_usize(self.col_count());
        // includes padding, which is always 0
        for &value in self.current.raw() {
            hasher.write_u8(u8::from(value > 0));
        }
        hasher.finish()
    }
}

fn live_neighbor_count(grid: &Grid, row: i32, col: i32) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| Some((row.checked_add(d_row)?, col.checked_add(d_col)?)))
        .map(|(row, col)| u8::from(grid.value_at(row, col) > 0))
        .sum()
}

fn next_value(rules: &Rules, grid: &Grid, row: i32, col: i32, current_value: Option<u8>) -> u8 {
    let current_value = current_value.unwrap_or_else(|| grid.value_at(row, col));
    let neighbor_count = live_neighbor_count(grid, row, col);
    if rules.is_alive_next(current_value > 0, neighbor_count) {
        neighbor_count
    } else {
        0
    }
}
