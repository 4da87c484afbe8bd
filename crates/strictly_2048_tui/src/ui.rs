//! Stateless rendering of the board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_2048::Metadata;

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

/// Banner shown over the board when the game stops accepting moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// The winning tile was reached.
    Won,
    /// No move is possible.
    Over,
}

impl Banner {
    /// Chooses the banner for a state summary, if any.
    pub fn for_metadata(metadata: &Metadata) -> Option<Self> {
        if !*metadata.terminated() {
            None
        } else if *metadata.over() {
            Some(Self::Over)
        } else {
            Some(Self::Won)
        }
    }

    fn lines(self) -> (&'static str, &'static str) {
        match self {
            Self::Won => ("You win!", "c: keep going   r: new game   q: quit"),
            Self::Over => ("Game over!", "r: try again   q: quit"),
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    /// Side length of the grid.
    pub size: usize,
    /// Tile values in row-major order, 0 for empty cells.
    pub values: Vec<u32>,
    /// Current score.
    pub score: u64,
    /// Best score recorded.
    pub best_score: u64,
    /// Banner drawn over the board.
    pub banner: Option<Banner>,
}

/// Renders the title, scores, board and key help.
pub fn draw(frame: &mut Frame, view: &BoardView) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Scores
            Constraint::Min(CELL_HEIGHT),
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Strictly 2048")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_scores(frame, chunks[1], view);
    let board_area = draw_board(frame, chunks[2], view);

    let help = Paragraph::new("arrows/wasd/hjkl: slide   r: restart   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    if let Some(banner) = view.banner {
        draw_banner(frame, board_area, banner);
    }
}

fn draw_scores(frame: &mut Frame, area: Rect, view: &BoardView) {
    let text = Line::from(vec![
        Span::styled("Score ", Style::default().fg(Color::Gray)),
        Span::styled(
            view.score.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Best ", Style::default().fg(Color::Gray)),
        Span::styled(
            view.best_score.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    let scores = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(scores, area);
}

/// Draws the tiles and returns the rectangle they occupy.
fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView) -> Rect {
    let side = u16::try_from(view.size).unwrap_or(u16::MAX);
    let board_area = center_rect(
        area,
        side.saturating_mul(CELL_WIDTH),
        side.saturating_mul(CELL_HEIGHT),
    );

    for (index, value) in view.values.iter().enumerate() {
        let (x, y) = (index % view.size, index / view.size);
        let cell = Rect {
            x: board_area.x.saturating_add((x as u16).saturating_mul(CELL_WIDTH)),
            y: board_area.y.saturating_add((y as u16).saturating_mul(CELL_HEIGHT)),
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
        .intersection(board_area);
        if !cell.is_empty() {
            draw_cell(frame, cell, *value);
        }
    }
    board_area
}

fn draw_cell(frame: &mut Frame, area: Rect, value: u32) {
    let label = if value == 0 {
        String::new()
    } else {
        value.to_string()
    };
    let tile = Paragraph::new(label)
        .style(tile_style(value))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(tile, area);
}

fn tile_style(value: u32) -> Style {
    let color = match value {
        0 => return Style::default().fg(Color::DarkGray),
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::LightRed,
        16 => Color::Red,
        32 => Color::LightMagenta,
        64 => Color::Magenta,
        128 => Color::LightGreen,
        256 => Color::Green,
        512 => Color::LightCyan,
        1024 => Color::Cyan,
        2048 => Color::Yellow,
        _ => Color::LightBlue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_banner(frame: &mut Frame, board_area: Rect, banner: Banner) {
    let (headline, hint) = banner.lines();
    let width = (hint.len() as u16 + 4).min(frame.area().width);
    let area = center_rect(board_area, width, 4).intersection(frame.area());

    let color = match banner {
        Banner::Won => Color::Yellow,
        Banner::Over => Color::Red,
    };
    let text = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    ];

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
