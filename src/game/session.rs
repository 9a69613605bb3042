use log::{debug, info};

use super::{Board, Player, COLS};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Where a committed piece landed and what it did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    pub outcome: Option<GameOutcome>,
}

/// One playthrough: the board, whose turn it is, and how the game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    board: Board,
    first_player: Player,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl Session {
    pub fn new(first_player: Player) -> Self {
        Session {
            board: Board::new(),
            first_player,
            current_player: first_player,
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Row a piece dropped into `col` would land in, for previews.
    pub fn preview_row(&self, col: usize) -> Option<usize> {
        if self.is_over() || !self.board.is_valid_location(col) {
            return None;
        }
        self.board.next_open_row(col)
    }

    /// Drop the current player's piece into `col`.
    ///
    /// The turn passes to the other player only when the piece is committed;
    /// rejected moves leave the session untouched.
    pub fn play(&mut self, col: usize) -> Result<Placement, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        if !self.board.is_valid_location(col) {
            return Err(MoveError::ColumnFull(col));
        }
        let row = self
            .board
            .next_open_row(col)
            .ok_or(MoveError::ColumnFull(col))?;

        let player = self.current_player;
        self.board.drop_piece(row, col, player.to_cell());
        debug!("{} dropped into column {col}, landed on row {row}", player.name());

        if self.board.winning_move(player) {
            self.outcome = Some(GameOutcome::Winner(player));
            info!("{} wins", player.name());
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
            info!("board is full, game drawn");
        }

        self.current_player = player.other();

        Ok(Placement {
            row,
            col,
            player,
            outcome: self.outcome,
        })
    }

    /// Start over with an empty board and the same first player.
    pub fn reset(&mut self) {
        *self = Session::new(self.first_player);
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Player::One)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, ROWS};

    /// Fills the board row by row without ever completing a line.
    const DRAW_SEQUENCE: [usize; 42] = [
        0, 1, 3, 2, 5, 4, 6, 1, 0, 3, 2, 5, 4, 6, 0, 2, 1, 4, 3, 5, 6, 0, 1, 2, 4, 3, 5, 6, 0,
        1, 2, 3, 4, 5, 6, 0, 1, 2, 4, 3, 6, 5,
    ];

    #[test]
    fn test_initial_session() {
        let session = Session::default();
        assert_eq!(session.current_player(), Player::One);
        assert!(!session.is_over());
        assert_eq!(session.outcome(), None);
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_play_lands_at_bottom_and_toggles_turn() {
        let mut session = Session::default();
        let placement = session.play(3).unwrap();

        assert_eq!(placement.row, 0);
        assert_eq!(placement.player, Player::One);
        assert_eq!(placement.outcome, None);
        assert_eq!(session.board().get(0, 3), Cell::PlayerOne);
        assert_eq!(session.current_player(), Player::Two);

        let placement = session.play(3).unwrap();
        assert_eq!(placement.row, 1);
        assert_eq!(session.board().get(1, 3), Cell::PlayerTwo);
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_full_column_keeps_turn() {
        let mut session = Session::default();
        for _ in 0..ROWS {
            session.play(0).unwrap();
        }
        let before = session.current_player();
        assert_eq!(session.play(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(session.current_player(), before);
    }

    #[test]
    fn test_invalid_column() {
        let mut session = Session::default();
        assert_eq!(session.play(COLS), Err(MoveError::InvalidColumn(COLS)));
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_win_detection() {
        let mut session = Session::default();

        // Player 1 builds along the bottom row, player 2 stacks on top
        for col in 0..3 {
            session.play(col).unwrap();
            session.play(col).unwrap();
        }
        let placement = session.play(3).unwrap();

        assert_eq!(placement.outcome, Some(GameOutcome::Winner(Player::One)));
        assert!(session.is_over());
        assert_eq!(session.play(4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_second_player_can_win() {
        let mut session = Session::new(Player::Two);
        for _ in 0..3 {
            session.play(5).unwrap();
            session.play(6).unwrap();
        }
        session.play(5).unwrap();
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::Two)));
    }

    #[test]
    fn test_draw() {
        let mut session = Session::default();
        for (i, &col) in DRAW_SEQUENCE.iter().enumerate() {
            let placement = session.play(col).unwrap();
            if i + 1 < DRAW_SEQUENCE.len() {
                assert_eq!(placement.outcome, None, "game ended early at move {i}");
            }
        }

        assert!(session.board().is_full());
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_preview_row() {
        let mut session = Session::default();
        assert_eq!(session.preview_row(2), Some(0));
        session.play(2).unwrap();
        assert_eq!(session.preview_row(2), Some(1));
        assert_eq!(session.preview_row(COLS), None);
    }

    #[test]
    fn test_reset_restores_first_player() {
        let mut session = Session::new(Player::Two);
        session.play(0).unwrap();
        session.reset();
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(*session.board(), Board::new());
        assert!(!session.is_over());
    }
}
