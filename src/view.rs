use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use keegol::{pos, Pos};
use termion::{event::Key, input::TermRead, raw::IntoRawMode, screen::AlternateScreen};
use tracing::{debug, warn};

use crate::game::{Game, Knob};

pub use canvas::Canvas;
mod canvas;

#[derive(Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Leave,
    Toggle,
    Paint,
    PlayPause,
    Step,
    Reset,
    Accelerate,
    Decelerate,
    Resize { rows: i32, cols: i32 },
    Rule(Knob, i8),
}

fn command_for(key: Key) -> Option<InputCmd> {
    let command = match key {
        Key::Char('q') | Key::Ctrl('c') => InputCmd::Exit,
        Key::Up => InputCmd::Move(Dir::Up),
        Key::Down => InputCmd::Move(Dir::Down),
        Key::Left => InputCmd::Move(Dir::Left),
        Key::Right => InputCmd::Move(Dir::Right),
        Key::Esc => InputCmd::Leave,
        Key::Char('\n') => InputCmd::Toggle,
        Key::Char('d') => InputCmd::Paint,
        Key::Char(' ') => InputCmd::PlayPause,
        Key::Char('n') => InputCmd::Step,
        Key::Char('r') => InputCmd::Reset,
        Key::Char('+') => InputCmd::Accelerate,
        Key::Char('-') => InputCmd::Decelerate,
        Key::Char('}') => InputCmd::Resize { rows: 1, cols: 0 },
        Key::Char('{') => InputCmd::Resize { rows: -1, cols: 0 },
        Key::Char(']') => InputCmd::Resize { rows: 0, cols: 1 },
        Key::Char('[') => InputCmd::Resize { rows: 0, cols: -1 },
        Key::Char('M') => InputCmd::Rule(Knob::Min, 1),
        Key::Char('m') => InputCmd::Rule(Knob::Min, -1),
        Key::Char('X') => InputCmd::Rule(Knob::Max, 1),
        Key::Char('x') => InputCmd::Rule(Knob::Max, -1),
        Key::Char('B') => InputCmd::Rule(Knob::Spawn, 1),
        Key::Char('b') => InputCmd::Rule(Knob::Spawn, -1),
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let key = match key {
            Ok(key) => key,
            Err(error) => {
                warn!(%error, "failed to read key");
                break;
            }
        };
        let Some(command) = command_for(key) else {
            continue;
        };
        if sender.send(command).is_err() {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(16);

/// Runs the game until the user quits. The world is only ever touched from
/// this loop; the input thread just forwards key presses.
pub fn run(mut game: Game) -> Result<()> {
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut screen = AlternateScreen::from(stdout().into_raw_mode()?);
    write_cursor_visibility(&mut screen, false)?;

    let mut view_origin = pos!(0, 0);
    loop {
        while let Ok(cmd) = receiver.try_recv() {
            debug!(?cmd, "input");
            if !handle_input(cmd, &mut game) {
                write_cursor_visibility(&mut screen, true)?;
                return Ok(());
            }
        }

        let mut canvas = Canvas::from_screen()?;
        if let Some(hover) = game.hover() {
            view_origin = follow(view_origin, hover, canvas.height(), canvas.width());
            canvas.highlight(hover - view_origin);
        }
        draw_frame(&mut game, &mut canvas, view_origin);
        canvas.display(&mut screen)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
}

fn write_cursor_visibility(out: &mut impl Write, visible: bool) -> io::Result<()> {
    if visible {
        write!(out, "{}", termion::cursor::Show)?;
    } else {
        write!(out, "{}", termion::cursor::Hide)?;
    }
    out.flush()
}

/// returns false when the game should end.
fn handle_input(cmd: InputCmd, game: &mut Game) -> bool {
    let result = match cmd {
        InputCmd::Exit => return false,
        InputCmd::Move(direction) => {
            game.move_hover(match direction {
                Dir::Up => pos!(-1, 0),
                Dir::Down => pos!(1, 0),
                Dir::Left => pos!(0, -1),
                Dir::Right => pos!(0, 1),
            });
            Ok(())
        }
        InputCmd::Leave => {
            game.clear_hover();
            Ok(())
        }
        InputCmd::Toggle => {
            game.toggle_hovered();
            Ok(())
        }
        InputCmd::Paint => {
            game.toggle_paint();
            Ok(())
        }
        InputCmd::PlayPause => {
            game.toggle_started();
            Ok(())
        }
        InputCmd::Step => {
            game.step_forward(Instant::now());
            Ok(())
        }
        InputCmd::Reset => {
            game.reset();
            Ok(())
        }
        InputCmd::Accelerate => {
            game.set_fps(game.fps() + 1);
            Ok(())
        }
        InputCmd::Decelerate => {
            game.set_fps(game.fps().saturating_sub(1));
            Ok(())
        }
        InputCmd::Resize { rows, cols } => {
            let world = game.world();
            let row_count = (world.row_count() as i32 + rows).max(1) as usize;
            let col_count = (world.col_count() as i32 + cols).max(1) as usize;
            game.set_row_count(row_count)
                .and_then(|_| game.set_col_count(col_count))
        }
        InputCmd::Rule(knob, delta) => game.adjust_rule(knob, delta),
    };
    if let Err(error) = result {
        warn!(%error, "ignored input");
    }
    true
}

/// shifts the view origin just enough to keep `target` on screen.
fn follow(origin: Pos, target: Pos, height: usize, width: usize) -> Pos {
    let axis = |origin: i32, target: i32, span: usize| {
        let span = span.max(1) as i32;
        if target < origin {
            target
        } else if target >= origin + span {
            target - span + 1
        } else {
            origin
        }
    };
    pos!(
        axis(origin.row, target.row, height),
        axis(origin.col, target.col, width)
    )
}

fn draw_frame(game: &mut Game, canvas: &mut Canvas, view_origin: Pos) {
    let light = game.world().min_neighbors();
    game.frame(Instant::now(), |row, col, current, next| {
        if let Some(c) = cell_char(current, next, light) {
            canvas.put(pos!(row, col) - view_origin, c);
        }
    });

    let world = game.world();
    let state = if game.started() { "running" } else { "paused" };
    let paint = match game.paint() {
        Some(paint) => format!(" | paint: {paint:?}"),
        None => String::new(),
    };
    canvas.status(format!(
        "{state} | gen {} | pop {} | {}x{} | B{}/S{}-{} | {} fps{paint}",
        world.generation(),
        world.population(),
        world.row_count(),
        world.col_count(),
        world.spawn_neighbors(),
        world.min_neighbors(),
        world.max_neighbors(),
        game.fps(),
    ));
}

/// Live cells that only just meet the survival minimum are drawn light,
/// the others dark. When the next value is known, imminent births show up
/// as a dot.
fn cell_char(current: u8, next: Option<u8>, light: u8) -> Option<char> {
    match (current, next) {
        (0, Some(next)) if next > 0 => Some('·'),
        (0, _) => None,
        (value, _) if value == light => Some('▒'),
        _ => Some('█'),
    }
}
