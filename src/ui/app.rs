//! Two-pass session: discovery, the optimize prompt, then replay.

use crate::simulation::grid::Grid;
use crate::simulation::optimizer::optimize;
use crate::simulation::run::{Pose, Run, RunConfig, RunReport, Snapshot};
use crate::ui::field::compute_maze_lines;
use crate::ui::render::{draw_ui, hud_lines};
use crossterm::event::KeyCode;
use ratatui::Frame;
use tracing::{error, info};

/// What to do with the discovered path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizeChoice {
    Yes,
    No,
    Ask,
}

pub enum Phase<'g> {
    Discovery(Run<'g>),
    /// Waiting for the yes/no answer.
    Prompt(RunReport),
    Replay {
        run: Run<'g>,
        discovery: RunReport,
    },
    Finished {
        discovery: RunReport,
        replay: Option<RunReport>,
    },
    Failed(String),
}

pub struct App<'g> {
    grid: &'g Grid,
    start: Pose,
    config: RunConfig,
    choice: OptimizeChoice,
    phase: Phase<'g>,
    last: Snapshot,
    /// Advance on every timer tick instead of waiting for a key.
    pub auto: bool,
}

impl<'g> App<'g> {
    #[must_use]
    pub fn new(grid: &'g Grid, start: Pose, config: RunConfig, choice: OptimizeChoice) -> Self {
        let run = Run::discover(grid, start, config);
        let last = run.snapshot();
        Self {
            grid,
            start,
            config,
            choice,
            phase: Phase::Discovery(run),
            last,
            auto: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase<'g> {
        &self.phase
    }

    /// State shown on screen: the active run, or the last one.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.last
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. } | Phase::Failed(_))
    }

    /// Advances the active run by one tick.
    pub fn step(&mut self) {
        let (result, snapshot) = match &mut self.phase {
            Phase::Discovery(run) | Phase::Replay { run, .. } => (run.tick(), run.snapshot()),
            _ => return,
        };
        self.last = snapshot;
        match result {
            Ok(None) => {}
            Ok(Some(_)) => self.complete_run(),
            Err(err) => {
                error!(%err, "run aborted");
                self.phase = Phase::Failed(err.to_string());
            }
        }
    }

    /// Applies the answer to the optimize prompt. Ignored in other phases.
    pub fn answer(&mut self, optimize_path: bool) {
        if !matches!(self.phase, Phase::Prompt(_)) {
            return;
        }
        let placeholder = Phase::Failed(String::new());
        if let Phase::Prompt(discovery) = std::mem::replace(&mut self.phase, placeholder) {
            self.phase = self.after_choice(discovery, optimize_path);
            self.refresh();
        }
    }

    /// Handles a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('a') => self.auto = !self.auto,
            KeyCode::Char('y' | 'Y') => self.answer(true),
            KeyCode::Char('n' | 'N') => self.answer(false),
            KeyCode::Char(' ') | KeyCode::Enter => self.step(),
            _ => {}
        }
        false
    }

    fn complete_run(&mut self) {
        let placeholder = Phase::Failed(String::new());
        self.phase = match std::mem::replace(&mut self.phase, placeholder) {
            Phase::Discovery(run) => match run.finish() {
                Some(discovery) => self.after_discovery(discovery),
                None => Phase::Failed("discovery ended without arriving".to_string()),
            },
            Phase::Replay { run, discovery } => Phase::Finished {
                discovery,
                replay: run.finish(),
            },
            other => other,
        };
        self.refresh();
    }

    /// Shows the replay from its first frame once it starts.
    fn refresh(&mut self) {
        if let Phase::Replay { run, .. } = &self.phase {
            self.last = run.snapshot();
        }
    }

    fn after_discovery(&self, discovery: RunReport) -> Phase<'g> {
        info!(path = %discovery.path, ticks = discovery.ticks, "discovery complete");
        match self.choice {
            OptimizeChoice::Ask => Phase::Prompt(discovery),
            OptimizeChoice::Yes => self.after_choice(discovery, true),
            OptimizeChoice::No => self.after_choice(discovery, false),
        }
    }

    fn after_choice(&self, discovery: RunReport, optimize_path: bool) -> Phase<'g> {
        if !optimize_path {
            return Phase::Finished {
                discovery,
                replay: None,
            };
        }
        let shortened = optimize(&discovery.path);
        info!(path = %shortened, "replaying optimized path");
        let run = Run::replay(self.grid, self.start, shortened, self.config);
        Phase::Replay { run, discovery }
    }

    /// One-line status or prompt under the maze.
    #[must_use]
    pub fn status(&self) -> String {
        let auto = if self.auto { "on" } else { "off" };
        match &self.phase {
            Phase::Discovery(_) | Phase::Replay { .. } => {
                format!("[space] step  [a] auto ({auto})  [q] quit")
            }
            Phase::Prompt(discovery) => {
                format!("Path: {} | Optimize path ? Y/n", discovery.path)
            }
            Phase::Finished {
                discovery,
                replay: Some(replay),
            } => format!(
                "Done. Discovery {} ticks ({}), replay {} ticks ({}). [q] quit",
                discovery.ticks, discovery.path, replay.ticks, replay.path
            ),
            Phase::Finished { discovery, .. } => format!(
                "Done. Discovery {} ticks, path {}. [q] quit",
                discovery.ticks, discovery.path
            ),
            Phase::Failed(message) => format!("Run aborted: {message}. [q] quit"),
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let lines = compute_maze_lines(
            self.grid,
            self.last.position,
            self.last.heading,
            self.config.goal,
        );
        draw_ui(f, lines, hud_lines(&self.last), &self.status());
    }
}
