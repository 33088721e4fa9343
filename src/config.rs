use std::path::PathBuf;

use clap::{value_parser, Parser};
use keegol::{Rules, WorldOptions};

pub const DEFAULT_ROWS: u32 = 80;
pub const DEFAULT_COLS: u32 = 125;
pub const DEFAULT_FPS: u32 = 10;

/// Runs a life-like automaton on a bounded grid in the terminal.
#[derive(Debug, Parser)]
#[command(name = "keegol", version, about)]
pub struct Config {
    /// Pattern file to stamp in the middle of the grid, `#` marks a live cell.
    #[arg(value_name = "PATH")]
    pub pattern: Option<PathBuf>,
    /// Number of rows in the grid.
    #[arg(
        long,
        default_value_t = DEFAULT_ROWS,
        value_parser = value_parser!(u32).range(1..=4096)
    )]
    pub rows: u32,
    /// Number of columns in the grid.
    #[arg(
        long,
        default_value_t = DEFAULT_COLS,
        value_parser = value_parser!(u32).range(1..=4096)
    )]
    pub cols: u32,
    /// Fewest live neighbors a live cell needs to survive.
    #[arg(long, default_value_t = 2, value_parser = value_parser!(u8).range(0..=8))]
    pub min_neighbors: u8,
    /// Most live neighbors a live cell can have and survive.
    #[arg(long, default_value_t = 3, value_parser = value_parser!(u8).range(0..=8))]
    pub max_neighbors: u8,
    /// Exact live neighbor count at which a dead cell is born.
    #[arg(long, default_value_t = 3, value_parser = value_parser!(u8).range(0..=8))]
    pub spawn_neighbors: u8,
    /// Generations per second while running.
    #[arg(
        long,
        default_value_t = DEFAULT_FPS,
        value_parser = value_parser!(u32).range(1..=240)
    )]
    pub fps: u32,
    /// Start paused.
    #[arg(long)]
    pub paused: bool,
}

impl Config {
    pub fn world_options(&self) -> WorldOptions {
        WorldOptions::new(self.rows as usize, self.cols as usize).with_rules(Rules::new(
            self.min_neighbors,
            self.max_neighbors,
            self.spawn_neighbors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["keegol"]).unwrap();
        assert_eq!(
            config.world_options(),
            WorldOptions::new(80, 125).with_rules(Rules::default())
        );
        assert_eq!(config.fps, DEFAULT_FPS);
        assert!(!config.paused);
        assert!(config.pattern.is_none());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "keegol",
            "glider.txt",
            "--rows",
            "5",
            "--cols",
            "7",
            "--min-neighbors",
            "1",
            "--max-neighbors",
            "4",
            "--spawn-neighbors",
            "2",
            "--paused",
        ])
        .unwrap();
        assert_eq!(
            config.world_options(),
            WorldOptions::new(5, 7).with_rules(Rules::new(1, 4, 2))
        );
        assert!(config.paused);
        assert_eq!(config.pattern, Some(PathBuf::from("glider.txt")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::try_parse_from(["keegol", "--rows", "0"]).is_err());
        assert!(Config::try_parse_from(["keegol", "--spawn-neighbors", "9"]).is_err());
        assert!(Config::try_parse_from(["keegol", "--fps", "0"]).is_err());
    }
}
