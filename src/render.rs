use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::controller::{GameState, HitTest, Snapshot};
use crate::grid::Cell;
use crate::input::Point;

const TITLE: &str = "Serpent Sprint";
const START_LABEL: &str = "Tap Space to Start";
const INSTRUCTIONS: [&str; 3] = [
    "Use arrow keys or WASD to glide.",
    "Collect neon bites to grow.",
    "Press Space to pause mid-run.",
];

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;

const HEAD_COLOR: Color = Color::Rgb(102, 252, 241);
const BODY_COLOR: Color = Color::Rgb(56, 176, 222);
const FOOD_COLOR: Color = Color::Rgb(255, 99, 132);
const GRID_COLOR: Color = Color::Rgb(45, 45, 60);
const TEXT_COLOR: Color = Color::Rgb(236, 240, 241);
const BUTTON_COLOR: Color = Color::Rgb(64, 74, 92);
const BUTTON_HOVER_COLOR: Color = Color::Rgb(102, 252, 241);
const BUTTON_HOVER_TEXT: Color = Color::Rgb(15, 15, 25);

#[derive(Debug, Default)]
pub struct Renderer {
    start_button: Option<Rect>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Score board
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        self.start_button = None;

        render_scoreboard(frame, chunks[0], snapshot);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(GRID_COLOR))
            .title(format!(" {} ", TITLE));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        match snapshot.state {
            GameState::Menu => self.render_menu(frame, inner, snapshot.pointer),
            GameState::Playing => render_board(frame, inner, snapshot),
            GameState::Paused => {
                render_board(frame, inner, snapshot);
                render_overlay(
                    frame,
                    inner,
                    "Paused",
                    "Take a breath, racer!".to_string(),
                    None,
                );
            }
            GameState::GameOver => {
                render_board(frame, inner, snapshot);
                render_overlay(
                    frame,
                    inner,
                    "Game Over",
                    format!("Final score: {}", snapshot.score),
                    Some("Press Enter to restart"),
                );
            }
        }

        frame.render_widget(controls(snapshot.state), chunks[2]);
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect, pointer: Option<Point>) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(HEAD_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            INSTRUCTIONS
                .iter()
                .map(|line| Line::from(Span::styled(*line, Style::default().fg(TEXT_COLOR)))),
        );
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);

        let width = START_LABEL.len() as u16 + 4;
        let button = centered(area, width, 3);
        let button = Rect {
            y: area.bottom().saturating_sub(4).max(button.y),
            ..button
        }
        .intersection(area);
        self.start_button = Some(button);

        let style = if pointer.is_some_and(|point| self.is_over_start_control(point)) {
            Style::default()
                .fg(BUTTON_HOVER_TEXT)
                .bg(BUTTON_HOVER_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_COLOR).bg(BUTTON_COLOR)
        };

        frame.render_widget(
            Paragraph::new(START_LABEL)
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                ),
            button,
        );
    }
}

impl HitTest for Renderer {
    fn is_over_start_control(&self, point: Point) -> bool {
        self.start_button.is_some_and(|rect| {
            (rect.left()..rect.right()).contains(&point.column)
                && (rect.top()..rect.bottom()).contains(&point.row)
        })
    }
}

fn render_scoreboard(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let label = Style::default().fg(Color::Yellow);
    let value = Style::default()
        .fg(TEXT_COLOR)
        .add_modifier(Modifier::BOLD);

    let block = Block::default().borders(Borders::ALL);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(block.inner(area));
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value),
        ])),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(snapshot.best_score.to_string(), value),
        ]))
        .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let size = snapshot.size;
    let board = centered(area, size.width.saturating_mul(CELL_WIDTH), size.height);
    frame.render_widget(Board(*snapshot), board);
}

fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: String,
    hint: Option<&str>,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(TEXT_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle, Style::default().fg(TEXT_COLOR))),
    ];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));
    }

    let popup = centered(area, 32, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(FOOD_COLOR)),
        ),
        popup,
    );
}

fn controls(state: GameState) -> Paragraph<'static> {
    let keys = Style::default().fg(Color::Cyan);
    let spans = match state {
        GameState::Menu => vec![
            Span::styled("Space/Enter", keys),
            Span::raw(" start | "),
            Span::styled("Q", keys),
            Span::raw(" quit"),
        ],
        GameState::Playing => vec![
            Span::styled("↑↓←→", keys),
            Span::raw(" or "),
            Span::styled("WASD", keys),
            Span::raw(" move | "),
            Span::styled("Space", keys),
            Span::raw(" pause | "),
            Span::styled("Q", keys),
            Span::raw(" quit"),
        ],
        GameState::Paused => vec![
            Span::styled("Space", keys),
            Span::raw(" resume | "),
            Span::styled("Esc", keys),
            Span::raw(" menu | "),
            Span::styled("Q", keys),
            Span::raw(" quit"),
        ],
        GameState::GameOver => vec![
            Span::styled("Enter", keys),
            Span::raw(" restart | "),
            Span::styled("Esc", keys),
            Span::raw(" menu | "),
            Span::styled("Q", keys),
            Span::raw(" quit"),
        ],
    };

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

struct Board<'a>(Snapshot<'a>);

impl Board<'_> {
    fn paint(area: Rect, buf: &mut Buffer, cell: Cell, symbol: &str, style: Style) {
        let x = cell.x * CELL_WIDTH as i32;
        if cell.x < 0 || cell.y < 0 || x + 1 >= area.width as i32 || cell.y >= area.height as i32
        {
            return;
        }
        let (x, y) = (area.x + x as u16, area.y + cell.y as u16);
        buf[(x, y)].set_symbol(symbol).set_style(style);
        buf[(x + 1, y)].set_symbol(" ").set_style(style);
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.0;

        for cell in snapshot.size.cells() {
            Self::paint(area, buf, cell, "·", Style::default().fg(GRID_COLOR));
        }

        if let Some(food) = snapshot.food {
            Self::paint(
                area,
                buf,
                food,
                "●",
                Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
            );
        }

        for (index, &cell) in snapshot.snake.iter().enumerate() {
            let color = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
            Self::paint(area, buf, cell, " ", Style::default().bg(color));
        }
    }
}
