#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::collapsible_if)]

mod cli;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use maze_robot::loader::{MazeFile, load_maze};
use maze_robot::simulation::generator::generate;
use maze_robot::simulation::optimizer::optimize;
use maze_robot::simulation::{Grid, Pose, Position, Run, RunConfig};
use maze_robot::ui::{App, OptimizeChoice};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let (grid, start, goal) = build_maze(&cli)?;
    let config = RunConfig {
        max_ticks: cli.max_ticks,
        path_capacity: cli.path_capacity,
        goal,
    };
    let choice = OptimizeChoice::from(cli.optimize);

    if cli.headless {
        return run_headless(&grid, start, config, choice);
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&grid, start, config, choice);
    let res = run_app(&mut terminal, &mut app, Duration::from_millis(cli.tick_ms));

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    println!("{}", app.status());

    Ok(())
}

/// Logs go to `--log-file` when given. Without one, the terminal view only
/// lets warnings through so the alternate screen stays clean.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let default = if cli.headless || cli.log_file.is_some() {
        "maze_robot=info"
    } else {
        "maze_robot=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn build_maze(cli: &Cli) -> Result<(Grid, Pose, Option<Position>), Box<dyn std::error::Error>> {
    if let Some((cols, rows)) = cli.generate {
        let maze = generate(cols, rows, cli.seed).ok_or("maze needs at least two cells")?;
        info!(cols, rows, seed = cli.seed, goal = %maze.goal, "maze generated");
        let start = match cli.start {
            Some(position) => Pose::new(position, cli.heading.into()),
            None => maze.start,
        };
        start.check(&maze.grid)?;
        return Ok((maze.grid, start, cli.goal.or(Some(maze.goal))));
    }

    let path = cli.maze.as_ref().ok_or("no maze file given")?;
    let MazeFile {
        grid,
        start: marker,
        goal,
    } = load_maze(path)?;
    let start = Pose::new(cli.start.or(marker).unwrap_or_default(), cli.heading.into());
    start.check(&grid)?;
    Ok((grid, start, cli.goal.or(goal)))
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        // 1. Update
        if app.auto && last_tick.elapsed() >= tick_rate {
            app.step();
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| app.draw(f))?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}

fn run_headless(
    grid: &Grid,
    start: Pose,
    config: RunConfig,
    choice: OptimizeChoice,
) -> Result<(), Box<dyn std::error::Error>> {
    let discovery = Run::discover(grid, start, config).run_to_end()?;
    println!(
        "Discovery: {} in {} ticks, path {}",
        discovery.arrival, discovery.ticks, discovery.path
    );

    let proceed = match choice {
        OptimizeChoice::Yes => true,
        OptimizeChoice::No => false,
        OptimizeChoice::Ask => confirm("Optimize path ? Y/n ")?,
    };
    if !proceed {
        return Ok(());
    }

    let shortened = optimize(&discovery.path);
    println!("New path : {shortened}");
    let replay = Run::replay(grid, start, shortened, config).run_to_end()?;
    println!(
        "Replay: {} in {} ticks ({} fewer)",
        replay.arrival,
        replay.ticks,
        discovery.ticks.saturating_sub(replay.ticks)
    );
    Ok(())
}

/// Asks until the answer is `Y` or `n`.
fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{question}");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            warn!("stdin closed, not optimizing");
            return Ok(false);
        }
        match line.trim() {
            "Y" => return Ok(true),
            "n" => return Ok(false),
            _ => {}
        }
    }
}
