//! A bounded, life-like cellular automaton with configurable birth and
//! survival thresholds.

pub use error::{Error, Result};
mod error;

pub use utils::Pos;
mod utils;

pub use grid::Grid;
mod grid;

pub use world::{Rules, World, WorldOptions};
mod world;

pub mod pattern;
