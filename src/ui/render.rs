use crate::simulation::run::Snapshot;
use crate::simulation::sensors::SensorReadings;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Number of HUD rows produced by [`hud_lines`].
pub const HUD_HEIGHT: u16 = 4;

fn flag(open: bool) -> u8 {
    u8::from(open)
}

#[must_use]
pub fn format_sensors(s: &SensorReadings) -> String {
    format!(
        "U:{} D:{} L:{} R:{}",
        flag(s.front),
        flag(s.back),
        flag(s.left),
        flag(s.right)
    )
}

/// Robot state as text, one line per row of the HUD.
#[must_use]
pub fn hud_lines(snapshot: &Snapshot) -> Vec<String> {
    let classification = snapshot
        .classification
        .map_or_else(|| "-".to_string(), |c| c.to_string());
    let cursor = snapshot
        .cursor
        .map_or_else(String::new, |c| format!(" | Cursor: {c}"));
    vec![
        format!(
            "Mode: {} | Tick: {} | {} | Facing: {}",
            snapshot.mode,
            snapshot.tick,
            snapshot.position,
            snapshot.heading.symbol()
        ),
        format!(
            "Sensors: {} | Cell: {classification}{cursor}",
            format_sensors(&snapshot.sensors)
        ),
        format!("Path: {}", snapshot.path),
        snapshot
            .arrival
            .map_or_else(String::new, |a| format!("Arrived: {a}")),
    ]
}

pub fn draw_ui(f: &mut Frame, grid_lines: Vec<String>, hud: Vec<String>, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HUD_HEIGHT), // HUD
            Constraint::Min(0),             // Maze
            Constraint::Length(1),          // Status / prompt
        ])
        .split(f.area());

    let hud: Vec<Line> = hud.into_iter().map(Line::from).collect();
    f.render_widget(
        Paragraph::new(hud).style(Style::default().add_modifier(Modifier::REVERSED)),
        chunks[0],
    );

    let text: Vec<Line> = grid_lines
        .into_iter()
        .map(|s| Line::from(Span::raw(s)))
        .collect();
    let maze = Paragraph::new(text)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    f.render_widget(maze, chunks[1]);

    f.render_widget(
        Paragraph::new(Span::styled(
            status.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[2],
    );
}
