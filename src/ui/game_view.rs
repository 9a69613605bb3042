use std::rc::Rc;

use crate::game::{Board, Cell, GameOutcome, Player, Session, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Preview line, top border, the rows, bottom border, column numbers.
const BOARD_HEIGHT: u16 = ROWS as u16 + 4;

const PIECE: &str = "\u{25cf}";
const GHOST: &str = "\u{25cb}";

/// Where the board was drawn, for mapping the mouse back to columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub area: Rect,
    /// First terminal column of board column 0
    pub origin_x: u16,
    pub cell_width: u16,
}

impl BoardLayout {
    pub fn compute(frame_area: Rect, cell_width: u16) -> Self {
        let board_chunk = sections(frame_area)[1];
        let width = (COLS as u16)
            .saturating_mul(cell_width)
            .saturating_add(2)
            .min(board_chunk.width);
        let x = board_chunk.x + (board_chunk.width - width) / 2;
        let area = Rect::new(x, board_chunk.y, width, BOARD_HEIGHT.min(board_chunk.height));
        BoardLayout {
            area,
            origin_x: x + 1,
            cell_width,
        }
    }
}

fn sections(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(BOARD_HEIGHT), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(area)
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

pub fn render(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    message: &Option<String>,
    cell_width: u16,
) -> BoardLayout {
    let chunks = sections(frame.area());
    let layout = BoardLayout::compute(frame.area(), cell_width);

    render_header(frame, session, chunks[0]);
    render_board(frame, session, selected_column, &layout);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);

    layout
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let (status, color) = match session.outcome() {
        Some(GameOutcome::Winner(player)) => {
            (format!("{} Wins!!", player.name()), player_color(player))
        }
        Some(GameOutcome::Draw) => ("It's a draw!".to_string(), Color::White),
        None => {
            let player = session.current_player();
            (format!("Current Player: {}", player.name()), player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn cell_text(symbol: &str, width: u16) -> String {
    format!("{:^width$}", symbol, width = usize::from(width))
}

fn render_board(frame: &mut Frame, session: &Session, selected_column: usize, layout: &BoardLayout) {
    let board: &Board = session.board();
    let width = layout.cell_width;
    let frame_style = Style::default().fg(Color::Blue);
    let landing_row = session.preview_row(selected_column);
    let mut lines = Vec::new();

    // Piece waiting above the selected column
    let mut preview = vec![Span::raw(" ")];
    for col in 0..COLS {
        if col == selected_column && !session.is_over() {
            let color = player_color(session.current_player());
            preview.push(Span::styled(cell_text(PIECE, width), Style::default().fg(color)));
        } else {
            preview.push(Span::raw(cell_text(" ", width)));
        }
    }
    lines.push(Line::from(preview));

    let rule = "\u{2550}".repeat(COLS * usize::from(width));
    lines.push(Line::styled(format!("\u{2554}{rule}\u{2557}"), frame_style));

    // Top row first; row 0 is the bottom of the board
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::styled("\u{2551}", frame_style)];

        for col in 0..COLS {
            let span = match board.get(row, col) {
                Cell::Empty if col == selected_column && landing_row == Some(row) => Span::styled(
                    cell_text(GHOST, width),
                    Style::default().fg(player_color(session.current_player())),
                ),
                Cell::Empty => Span::styled(cell_text(".", width), Style::default().fg(Color::DarkGray)),
                Cell::PlayerOne => Span::styled(
                    cell_text(PIECE, width),
                    Style::default().fg(player_color(Player::One)),
                ),
                Cell::PlayerTwo => Span::styled(
                    cell_text(PIECE, width),
                    Style::default().fg(player_color(Player::Two)),
                ),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::styled("\u{2551}", frame_style));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::styled(format!("\u{255a}{rule}\u{255d}"), frame_style));

    let mut numbers = vec![Span::raw(" ")];
    for col in 0..COLS {
        let label = cell_text(&(col + 1).to_string(), width);
        if col == selected_column {
            numbers.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            numbers.push(Span::raw(label));
        }
    }
    lines.push(Line::from(numbers));

    frame.render_widget(Paragraph::new(lines), layout.area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Mouse/\u{2190}\u{2192}: Aim  |  Click/Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
