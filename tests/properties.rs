use keegol::{Rules, World, WorldOptions};
use proptest::prelude::*;

/// a world shape, its rules and one liveness flag per cell.
fn seeded_world() -> impl Strategy<Value = (WorldOptions, Vec<bool>)> {
    (1usize..12, 1usize..20, 0u8..=8, 0u8..=8, 0u8..=8).prop_flat_map(
        |(rows, cols, min, max, spawn)| {
            let options = WorldOptions::new(rows, cols).with_rules(Rules::new(min, max, spawn));
            (Just(options), prop::collection::vec(any::<bool>(), rows * cols))
        },
    )
}

fn build(options: WorldOptions, alive: &[bool]) -> World {
    let mut world = World::new(options).unwrap();
    for (index, &alive) in alive.iter().enumerate() {
        if alive {
            let (row, col) = (index / options.col_count, index % options.col_count);
            world.spawn_at(row as i32, col as i32);
        }
    }
    world
}

fn snapshot(world: &World) -> Vec<u8> {
    let mut out = vec![];
    world.iterate(|_, _, value| out.push(value));
    out
}

/// reference update on a plain 2d vector with explicit bounds checks.
fn step_naive(options: WorldOptions, cells: &[u8]) -> Vec<u8> {
    let (rows, cols) = (options.row_count as i32, options.col_count as i32);
    let alive = |row: i32, col: i32| {
        row >= 0 && col >= 0 && row < rows && col < cols && cells[(row * cols + col) as usize] > 0
    };
    let mut out = vec![0; cells.len()];
    for row in 0..rows {
        for col in 0..cols {
            let mut neighbors = 0u8;
            for d_row in -1..=1 {
                for d_col in -1..=1 {
                    if (d_row, d_col) != (0, 0) && alive(row + d_row, col + d_col) {
                        neighbors += 1;
                    }
                }
            }
            let rules = options.rules;
            let next_alive = if alive(row, col) {
                rules.min_neighbors <= neighbors && neighbors <= rules.max_neighbors
            } else {
                neighbors == rules.spawn_neighbors
            };
            out[(row * cols + col) as usize] = if next_alive { neighbors } else { 0 };
        }
    }
    out
}

proptest! {
    #[test]
    fn step_forward_is_a_simultaneous_update((options, alive) in seeded_world()) {
        let mut world = build(options, &alive);
        let before = snapshot(&world);

        let mut predicted = vec![];
        world.iterate(|row, col, _| predicted.push(world.next_value_at(row, col, None)));

        world.step_forward();
        let after = snapshot(&world);
        prop_assert_eq!(&after, &predicted);
        prop_assert_eq!(&after, &step_naive(options, &before));
        prop_assert!(after.iter().all(|&value| value <= 8));
    }

    #[test]
    fn fused_step_matches_two_phase_step((options, alive) in seeded_world()) {
        let mut fused = build(options, &alive);
        let mut two_phase = fused.clone();

        let mut nexts = vec![];
        fused.iterate_and_step_forward(|_, _, _, next| nexts.push(next));
        two_phase.populate_next_grid();
        two_phase.adopt_next_grid();

        prop_assert_eq!(snapshot(&fused), snapshot(&two_phase));
        prop_assert_eq!(nexts, snapshot(&two_phase));
        prop_assert_eq!(fused.fingerprint(), two_phase.fingerprint());
    }

    #[test]
    fn split_timeline_clips_to_new_bounds(
        (options, alive) in seeded_world(),
        rows in 1usize..16,
        cols in 1usize..24,
    ) {
        let world = build(options, &alive);
        let split = world.split_timeline(options.with_row_count(rows).with_col_count(cols)).unwrap();

        prop_assert_eq!((split.row_count(), split.col_count()), (rows, cols));
        split.iterate(|row, col, value| {
            let inside = (row as usize) < world.row_count() && (col as usize) < world.col_count();
            let expected = if inside { world.current_value_at(row, col) } else { 0 };
            assert_eq!(value, expected, "({row}, {col})");
        });
        prop_assert_eq!(snapshot(&world), snapshot(&build(options, &alive)));
    }
}
