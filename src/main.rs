use std::io::stderr;

use anyhow::Result;
use clap::Parser;
use keegol::{pattern, pos, World};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use config::Config;
mod config;

pub use game::Game;
mod game;

mod view;

pub fn main() -> Result<()> {
    // stdout belongs to the renderer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(stderr)
        .with_target(true)
        .init();

    let config = Config::parse();
    let mut world = World::new(config.world_options())?;

    if let Some(path) = &config.pattern {
        let cells = pattern::load(path)?;
        let (rows, cols) = pattern::extent(&cells);
        if rows > world.row_count() || cols > world.col_count() {
            warn!(rows, cols, "pattern does not fit the grid, clipping it");
        }
        let offset = pos!(
            (world.row_count().saturating_sub(rows) / 2) as i32,
            (world.col_count().saturating_sub(cols) / 2) as i32
        );
        world.spawn_all(cells, offset);
        info!(path = %path.display(), population = world.population(), "seeded world");
    }

    let game = Game::new(world, config.fps, !config.paused);
    view::run(game)
}
