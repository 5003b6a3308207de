//! End-to-end runs through small hand-drawn mazes and generated ones.

use maze_robot::loader::parse_maze;
use maze_robot::simulation::generator::generate;
use maze_robot::simulation::optimizer::optimize;
use maze_robot::simulation::{
    Arrival, Grid, Heading, Path, PathError, Pose, Position, Run, RunConfig, SimulationError,
};
use proptest::prelude::*;

fn grid(rows: &[&str]) -> Grid {
    parse_maze(&rows.join("\n")).unwrap().grid
}

fn with_goal(x: i32, y: i32) -> RunConfig {
    RunConfig {
        goal: Some(Position::new(x, y)),
        ..RunConfig::default()
    }
}

/// A T-junction at the top of a stem, both arms two cells long.
const TEE: [&str; 4] = [".....", "##.##", "##.##", "##.##"];

fn tee_start() -> Pose {
    Pose::new(Position::new(2, 3), Heading::Up)
}

fn assert_trail_is_walkable(grid: &Grid, trail: &[Position]) {
    for pos in trail {
        assert!(grid.is_open(*pos), "trail passes through {pos}");
    }
    for pair in trail.windows(2) {
        let dx = (pair[0].x - pair[1].x).abs();
        let dy = (pair[0].y - pair[1].y).abs();
        assert_eq!(dx + dy, 1, "jump from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_straight_corridor_reaches_far_end() {
    let n = 6;
    let maze = grid(&["......"]);
    let start = Pose::new(Position::new(0, 0), Heading::Right);

    let report = Run::discover(&maze, start, with_goal(n - 1, 0))
        .run_to_end()
        .unwrap();

    assert_eq!(report.arrival, Arrival::Goal);
    assert_eq!(report.ticks, u64::try_from(n - 1).unwrap());
    assert!(report.path.is_empty());
    assert_eq!(report.end.position, Position::new(n - 1, 0));
}

#[test]
fn test_open_pad_is_destination() {
    let maze = grid(&["###.#", ".....", "###.#"]);
    let start = Pose::new(Position::new(0, 1), Heading::Right);

    let report = Run::discover(&maze, start, RunConfig::default())
        .run_to_end()
        .unwrap();

    assert_eq!(report.arrival, Arrival::Destination);
    assert_eq!(report.ticks, 3);
    assert_eq!(report.end.position, Position::new(3, 1));
    assert!(report.path.is_empty());
}

#[test]
fn test_t_junction_records_left() {
    let maze = grid(&TEE);
    let report = Run::discover(&maze, tee_start(), with_goal(0, 0))
        .run_to_end()
        .unwrap();

    assert_eq!(report.path.to_string(), "L");
    assert_eq!(report.ticks, 5);
}

#[test]
fn test_junction_prefers_straight_over_right() {
    let maze = grid(&["#.#", "#..", "#.#", "#.#"]);
    let start = Pose::new(Position::new(1, 3), Heading::Up);

    let report = Run::discover(&maze, start, with_goal(1, 0))
        .run_to_end()
        .unwrap();

    assert_eq!(report.path.to_string(), "U");
    assert_eq!(report.ticks, 3);
}

#[test]
fn test_corridor_bend_is_not_recorded() {
    let maze = grid(&["#..", "#.#"]);
    let start = Pose::new(Position::new(1, 1), Heading::Up);

    let report = Run::discover(&maze, start, with_goal(2, 0))
        .run_to_end()
        .unwrap();

    assert!(report.path.is_empty());
    assert_eq!(report.ticks, 2);
    assert_eq!(report.end.heading, Heading::Right);
}

#[test]
fn test_dead_end_is_recorded_as_u_turn() {
    let maze = grid(&["...."]);
    let start = Pose::new(Position::new(1, 0), Heading::Right);

    let report = Run::discover(&maze, start, with_goal(0, 0))
        .run_to_end()
        .unwrap();

    assert_eq!(report.path.to_string(), "D");
    assert_eq!(report.ticks, 5);
    assert_eq!(report.end.heading, Heading::Left);
}

#[test]
fn test_discover_optimize_replay() {
    let maze = grid(&TEE);
    let config = with_goal(4, 0);

    let discovery = Run::discover(&maze, tee_start(), config)
        .run_to_end()
        .unwrap();
    assert_eq!(discovery.path.to_string(), "LDU");
    assert_eq!(discovery.ticks, 9);

    let shortened = optimize(&discovery.path);
    assert_eq!(shortened.to_string(), "R");

    let replay = Run::replay(&maze, tee_start(), shortened, config)
        .run_to_end()
        .unwrap();
    assert_eq!(replay.arrival, Arrival::Goal);
    assert_eq!(replay.ticks, 5);
    assert_trail_is_walkable(&maze, &replay.trail);
}

#[test]
fn test_replay_without_enough_symbols_fails() {
    let maze = grid(&TEE);
    let result = Run::replay(&maze, tee_start(), Path::new(), with_goal(4, 0)).run_to_end();

    assert_eq!(
        result,
        Err(SimulationError::ReplayExhausted {
            position: Position::new(2, 0),
            consumed: 0
        })
    );
}

#[test]
fn test_replay_into_wall_is_a_collision() {
    let maze = grid(&TEE);
    let path = Path::parse("U", 8).unwrap();
    let result = Run::replay(&maze, tee_start(), path, with_goal(4, 0)).run_to_end();

    assert_eq!(
        result,
        Err(SimulationError::Collision {
            position: Position::new(2, -1)
        })
    );
}

#[test]
fn test_tick_limit() {
    let maze = grid(&["......"]);
    let start = Pose::new(Position::new(0, 0), Heading::Right);
    let config = RunConfig {
        max_ticks: 2,
        ..with_goal(5, 0)
    };

    let result = Run::discover(&maze, start, config).run_to_end();
    assert_eq!(result, Err(SimulationError::TickLimit { limit: 2 }));
}

#[test]
fn test_full_path_buffer_aborts_run() {
    let maze = grid(&["...."]);
    let start = Pose::new(Position::new(1, 0), Heading::Right);
    let config = RunConfig {
        path_capacity: 0,
        ..with_goal(0, 0)
    };

    let result = Run::discover(&maze, start, config).run_to_end();
    assert_eq!(
        result,
        Err(SimulationError::Path(PathError::CapacityExceeded { capacity: 0 }))
    );
}

#[test]
fn test_snapshot_tracks_ticks() {
    let maze = grid(&TEE);
    let mut run = Run::discover(&maze, tee_start(), with_goal(0, 0));

    let before = run.snapshot();
    assert_eq!(before.tick, 0);
    assert_eq!(before.classification, None);
    assert_eq!(before.mode, "discovery");

    for _ in 0..4 {
        assert_eq!(run.tick(), Ok(None));
    }
    let after = run.snapshot();
    assert_eq!(after.tick, 4);
    assert_eq!(after.position, Position::new(1, 0));
    assert_eq!(after.heading, Heading::Left);
    assert_eq!(after.path, "L");
    assert_eq!(run.trail().len(), 5);

    assert_eq!(run.tick(), Ok(Some(Arrival::Goal)));
    // Finished runs stay put.
    assert_eq!(run.tick(), Ok(Some(Arrival::Goal)));
    assert_eq!(run.snapshot().tick, 5);
}

#[test]
fn test_huge_path_capacity_is_not_preallocated() {
    let maze = grid(&TEE);
    let config = RunConfig {
        path_capacity: usize::MAX,
        ..with_goal(4, 0)
    };

    let report = Run::discover(&maze, tee_start(), config).run_to_end().unwrap();
    assert_eq!(report.path.to_string(), "LDU");
    assert_eq!(report.path.capacity(), usize::MAX);
}

#[test]
fn test_start_must_be_open() {
    let maze = grid(&TEE);

    assert_eq!(tee_start().check(&maze), Ok(()));
    let walled = Pose::new(Position::new(0, 1), Heading::Up);
    assert_eq!(
        walled.check(&maze),
        Err(SimulationError::BlockedStart {
            position: Position::new(0, 1)
        })
    );
    let far = Pose::new(Position::new(i32::MAX, 0), Heading::Right);
    assert!(far.check(&maze).is_err());
}

#[test]
fn test_start_at_coordinate_limit_does_not_overflow() {
    let maze = grid(&TEE);
    let start = Pose::new(Position::new(i32::MAX, 0), Heading::Right);
    let mut run = Run::discover(&maze, start, RunConfig::default());

    assert!(matches!(
        run.tick(),
        Err(SimulationError::Collision { .. })
    ));
}

#[test]
fn test_collision_keeps_pose() {
    let maze = grid(&["#.#", "..#", "#.#"]);
    let start = Pose::new(Position::new(1, 2), Heading::Up);
    let path = Path::parse("R", 8).unwrap();
    let mut run = Run::replay(&maze, start, path, RunConfig::default());

    assert_eq!(run.tick(), Ok(None));
    assert_eq!(
        run.tick(),
        Err(SimulationError::Collision {
            position: Position::new(2, 1)
        })
    );
    assert_eq!(run.robot().position, Position::new(1, 1));
    assert_eq!(run.robot().heading, Heading::Up);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generated_mazes_have_no_open_pads(cols in 2i32..=6, rows in 2i32..=6, seed in any::<u64>()) {
        let maze = generate(cols, rows, seed).unwrap();
        for y in 0..maze.grid.height() {
            for x in 0..maze.grid.width() {
                let pos = Position::new(x, y);
                let open = Heading::ALL
                    .into_iter()
                    .filter(|&h| maze.grid.is_open(pos.step(h)))
                    .count();
                prop_assert!(open < 4, "all-open cell at {}", pos);
            }
        }
        prop_assert!(maze.grid.is_open(maze.start.position));
        prop_assert!(maze.grid.is_open(maze.start.position.step(maze.start.heading)));
        prop_assert!(maze.grid.is_open(maze.goal));
    }

    #[test]
    fn prop_optimized_replay_reaches_goal(cols in 2i32..=5, rows in 2i32..=5, seed in any::<u64>()) {
        let maze = generate(cols, rows, seed).unwrap();
        let config = RunConfig { goal: Some(maze.goal), ..RunConfig::default() };

        let discovery = Run::discover(&maze.grid, maze.start, config).run_to_end().unwrap();
        prop_assert_eq!(discovery.arrival, Arrival::Goal);
        assert_trail_is_walkable(&maze.grid, &discovery.trail);

        let shortened = optimize(&discovery.path);
        let replay = Run::replay(&maze.grid, maze.start, shortened, config).run_to_end().unwrap();
        prop_assert_eq!(replay.arrival, Arrival::Goal);
        prop_assert_eq!(replay.end.position, maze.goal);
        prop_assert!(replay.ticks <= discovery.ticks);
        assert_trail_is_walkable(&maze.grid, &replay.trail);
    }
}

#[test]
fn test_bundled_reference_maze() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/mazes/reference.txt");
    let maze = maze_robot::loader::load_maze(path).unwrap();
    let start = Pose::new(maze.start.unwrap(), Heading::Right);
    let config = RunConfig {
        goal: maze.goal,
        ..RunConfig::default()
    };

    let discovery = Run::discover(&maze.grid, start, config).run_to_end().unwrap();
    assert_eq!(discovery.path.to_string(), "LDULDUU");
    assert_eq!(discovery.ticks, 48);

    let shortened = optimize(&discovery.path);
    assert_eq!(shortened.to_string(), "RRU");

    let replay = Run::replay(&maze.grid, start, shortened, config).run_to_end().unwrap();
    assert_eq!(replay.ticks, 40);
    assert_eq!(Some(replay.end.position), maze.goal);
    assert_trail_is_walkable(&maze.grid, &replay.trail);
}
