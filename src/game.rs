use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use keegol::{Pos, Result, Rules, World};
use tracing::info;

/// how many past generations are remembered to notice a cycle.
const HISTORY_LEN: usize = 10;

/// what painting does to the cells the cursor passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Spawn,
    Kill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    Min,
    Max,
    Spawn,
}

/// Owns the world and everything the front-end needs to drive it: pacing,
/// the hover cursor and painting.
#[derive(Debug)]
pub struct Game {
    world: World,
    fps: u32,
    started: bool,
    hover: Option<Pos>,
    paint: Option<Paint>,
    last_stepped_at: Option<Instant>,
    history: VecDeque<u64>,
}

impl Game {
    pub fn new(world: World, fps: u32, started: bool) -> Self {
        Self {
            world,
            fps: fps.max(1),
            started,
            hover: None,
            paint: None,
            last_stepped_at: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(1, 240);
    }

    pub fn hover(&self) -> Option<Pos> {
        self.hover
    }

    pub fn paint(&self) -> Option<Paint> {
        self.paint
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    pub fn start(&mut self) {
        self.started = true;
        info!(generation = self.world.generation(), "started");
    }

    pub fn stop(&mut self) {
        self.started = false;
        info!(generation = self.world.generation(), "stopped");
    }

    pub fn toggle_started(&mut self) {
        if self.started {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.world.reset();
        self.history.clear();
    }

    pub fn should_step_forward(&self, now: Instant) -> bool {
        self.started
            && self
                .last_stepped_at
                .map_or(true, |last| now >= last + self.frame_interval())
    }

    /// Draws every cell through `draw(row, col, current, next)`, stepping
    /// forward in the same pass when a step is due. `next` is only known
    /// when stepping.
    pub fn frame(&mut self, now: Instant, mut draw: impl FnMut(i32, i32, u8, Option<u8>)) {
        if self.should_step_forward(now) {
            self.world.iterate_and_step_forward(|row, col, current, next| {
                draw(row, col, current, Some(next))
            });
            self.stepped(now);
        } else {
            self.world.iterate(|row, col, current| draw(row, col, current, None));
        }
    }

    /// a single generation, regardless of pacing.
    pub fn step_forward(&mut self, now: Instant) {
        self.world.step_forward();
        self.stepped(now);
    }

    fn stepped(&mut self, now: Instant) {
        self.last_stepped_at = Some(now);
        if self.check_for_cycle() && self.started {
            info!(generation = self.world.generation(), "cycle detected");
            self.stop();
        }
    }

    fn check_for_cycle(&mut self) -> bool {
        let fingerprint = self.world.fingerprint();
        if self.history.contains(&fingerprint) {
            return true;
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
        false
    }

    pub fn set_hover(&mut self, pos: Pos) {
        let pos = pos.clamp_to(self.world.row_count(), self.world.col_count());
        self.hover = Some(pos);
        if let Some(paint) = self.paint {
            self.apply(paint, pos);
        }
    }

    pub fn move_hover(&mut self, delta: Pos) {
        let from = self.hover.unwrap_or_default();
        self.set_hover(from + delta);
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
        self.paint = None;
    }

    /// Starts painting from the hovered cell, or stops if already painting.
    /// The hovered cell decides the mode: a dead one paints live cells, a
    /// live one erases.
    pub fn toggle_paint(&mut self) {
        if self.paint.take().is_some() {
            return;
        }
        let Some(pos) = self.hover else {
            return;
        };
        let paint = if self.world.is_alive_at(pos.row, pos.col) {
            Paint::Kill
        } else {
            Paint::Spawn
        };
        self.paint = Some(paint);
        self.apply(paint, pos);
    }

    pub fn toggle_hovered(&mut self) {
        if let Some(Pos { row, col }) = self.hover {
            self.world.toggle_at(row, col);
            self.history.clear();
        }
    }

    fn apply(&mut self, paint: Paint, Pos { row, col }: Pos) {
        match paint {
            Paint::Spawn => self.world.spawn_at(row, col),
            Paint::Kill => self.world.kill_at(row, col),
        };
        self.history.clear();
    }

    pub fn set_row_count(&mut self, row_count: usize) -> Result<()> {
        let options = self.world.options().with_row_count(row_count);
        let world = self.world.split_timeline(options)?;
        self.replace_world(world);
        Ok(())
    }

    pub fn set_col_count(&mut self, col_count: usize) -> Result<()> {
        let options = self.world.options().with_col_count(col_count);
        let world = self.world.split_timeline(options)?;
        self.replace_world(world);
        Ok(())
    }

    pub fn set_rules(&mut self, rules: Rules) -> Result<()> {
        let options = self.world.options().with_rules(rules);
        let world = self.world.split_timeline(options)?;
        self.replace_world(world);
        Ok(())
    }

    /// nudges one rule threshold, keeping it within 0..=8.
    pub fn adjust_rule(&mut self, knob: Knob, delta: i8) -> Result<()> {
        let mut rules = self.world.rules();
        let value = match knob {
            Knob::Min => &mut rules.min_neighbors,
            Knob::Max => &mut rules.max_neighbors,
            Knob::Spawn => &mut rules.spawn_neighbors,
        };
        *value = value.saturating_add_signed(delta).min(8);
        self.set_rules(rules)
    }

    fn replace_world(&mut self, world: World) {
        self.world = world;
        self.history.clear();
        if let Some(pos) = self.hover {
            self.hover = Some(pos.clamp_to(self.world.row_count(), self.world.col_count()));
        }
    }
}
