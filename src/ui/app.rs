use std::io;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameOutcome, Session, COLS};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use ratatui::{backend::Backend, Terminal};

use super::game_view::{self, BoardLayout};
use super::input;

pub struct App {
    session: Session,
    config: AppConfig,
    selected_column: usize,
    board_layout: Option<BoardLayout>,
    finished_at: Option<Instant>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            session: Session::new(config.game.first_player),
            config,
            selected_column: COLS / 2, // Start in middle
            board_layout: None,
            finished_at: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit || self.end_delay_elapsed() {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// The game over screen stays up for the configured delay, then the app closes.
    fn end_delay_elapsed(&self) -> bool {
        self.finished_at
            .is_some_and(|at| at.elapsed() >= self.config.ui.end_delay())
    }

    /// Handle terminal events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = input::shift_column(self.selected_column, -1);
            }
            KeyCode::Right => {
                self.selected_column = input::shift_column(self.selected_column, 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// Pointer motion aims, a left click drops
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.board_layout else {
            return;
        };
        let Some(col) = input::column_at(mouse.column, layout.origin_x, layout.cell_width) else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.selected_column = col;
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.selected_column = col;
                self.drop_piece();
            }
            _ => {}
        }
    }

    /// Start a new game and cancel a pending close
    fn restart(&mut self) {
        self.session.reset();
        self.selected_column = COLS / 2;
        self.finished_at = None;
        self.message = Some("New game started!".to_string());
        info!("new game, {} to move", self.session.current_player().name());
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        // The result stays on screen until the window closes
        if self.finished_at.is_some() {
            return;
        }
        self.message = None;

        match self.session.play(self.selected_column) {
            Ok(placement) => {
                debug!("board after move:\n{}", self.session.board());
                if let Some(outcome) = placement.outcome {
                    self.message = Some(match outcome {
                        GameOutcome::Winner(player) => format!("{} wins!", player.name()),
                        GameOutcome::Draw => "It's a draw!".to_string(),
                    });
                    info!("closing in {} ms", self.config.ui.end_delay_ms);
                    self.finished_at = Some(Instant::now());
                }
            }
            Err(MoveError::ColumnFull(col)) => {
                self.message = Some(format!("Column {} is full, pick another", col + 1));
            }
            Err(err) => {
                self.message = Some(capitalize(&err.to_string()));
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let layout = game_view::render(
            frame,
            &self.session,
            self.selected_column,
            &self.message,
            self.config.ui.cell_width,
        );
        self.board_layout = Some(layout);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player, ROWS};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, layout::Rect};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn laid_out_app() -> App {
        let mut app = App::default();
        app.board_layout = Some(BoardLayout {
            area: Rect::new(9, 3, 23, 10),
            origin_x: 10,
            cell_width: 3,
        });
        app
    }

    #[test]
    fn test_keyboard_moves_and_drops() {
        let mut app = App::default();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_column, 1);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session().board().get(0, 1), Cell::PlayerOne);
        assert_eq!(app.session().current_player(), Player::Two);
    }

    #[test]
    fn test_mouse_hover_and_click() {
        let mut app = laid_out_app();
        mouse(&mut app, MouseEventKind::Moved, 10 + 3 * 5 + 1);
        assert_eq!(app.selected_column, 5);

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 10);
        assert_eq!(app.selected_column, 0);
        assert_eq!(app.session().board().get(0, 0), Cell::PlayerOne);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = laid_out_app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 2);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 10 + 3 * 7);
        assert_eq!(*app.session().board(), crate::game::Board::new());
    }

    #[test]
    fn test_full_column_reports_and_keeps_turn() {
        let mut app = App::default();
        for _ in 0..ROWS {
            press(&mut app, KeyCode::Enter);
        }
        let turn = app.session().current_player();
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session().current_player(), turn);
        assert_eq!(app.message.as_deref(), Some("Column 4 is full, pick another"));
    }

    #[test]
    fn test_win_starts_end_delay() {
        let mut app = App::default();
        for col in 0..3 {
            app.selected_column = col;
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }
        app.selected_column = 3;
        press(&mut app, KeyCode::Enter);

        assert!(app.session().is_over());
        assert_eq!(app.message.as_deref(), Some("Player 1 wins!"));
        assert!(app.finished_at.is_some());

        app.finished_at = Some(Instant::now() - app.config.ui.end_delay());
        assert!(app.end_delay_elapsed());
    }

    fn won_app() -> App {
        let mut app = App::default();
        for col in 0..3 {
            app.selected_column = col;
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }
        app.selected_column = 3;
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_drops_after_win_keep_result_message() {
        let mut app = laid_out_app();
        let won = won_app();
        app.session = won.session;
        app.finished_at = won.finished_at;
        app.message = won.message;

        press(&mut app, KeyCode::Enter);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 10);

        assert_eq!(app.message.as_deref(), Some("Player 1 wins!"));
        assert_eq!(app.session().board().get(0, 0), Cell::PlayerOne);
        assert_eq!(app.session().board().get(2, 0), Cell::Empty);
    }

    #[test]
    fn test_restart_after_win() {
        let mut app = won_app();
        press(&mut app, KeyCode::Char('r'));

        assert!(!app.session().is_over());
        assert!(app.finished_at.is_none());
        assert!(!app.end_delay_elapsed());
        assert_eq!(*app.session().board(), crate::game::Board::new());
        assert_eq!(app.session().current_player(), Player::One);
        assert_eq!(app.message.as_deref(), Some("New game started!"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().board().get(0, COLS / 2), Cell::PlayerOne);
    }

    #[test]
    fn test_render_records_board_layout() {
        let mut terminal = ratatui::Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::default();
        terminal.draw(|f| app.render(f)).unwrap();
        assert_eq!(
            app.board_layout,
            Some(BoardLayout::compute(Rect::new(0, 0, 80, 24), 3))
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
