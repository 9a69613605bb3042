use std::fmt;

use super::player::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of same-owner cells in a line needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The playing grid. Row 0 is the bottom of the board, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column can take another piece while its top cell is empty.
    /// Columns outside the board are never valid.
    pub fn is_valid_location(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col].is_empty()
    }

    /// Lowest empty row in `col`, scanning upward from the bottom.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col].is_empty())
    }

    /// Write `piece` at `(row, col)` without any legality checks.
    ///
    /// Callers are expected to have confirmed the column with
    /// [`Board::is_valid_location`] and taken `row` from
    /// [`Board::next_open_row`]. Bounds are only asserted in debug builds.
    pub fn drop_piece(&mut self, row: usize, col: usize, piece: Cell) {
        debug_assert!(row < ROWS && col < COLS, "({row}, {col}) is off the board");
        self.cells[row][col] = piece;
    }

    /// Checked form of [`Board::drop_piece`]: the target must be on the board
    /// and be the landing row of its column.
    pub fn try_drop_piece(&mut self, row: usize, col: usize, piece: Cell) -> Result<(), MoveError> {
        if row >= ROWS || col >= COLS {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if self.next_open_row(col) != Some(row) {
            return Err(MoveError::NotNextOpenRow { row, col });
        }
        self.cells[row][col] = piece;
        Ok(())
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_valid_location(col))
    }

    /// Whether `player` owns a run of four anywhere on the board.
    ///
    /// Lines are scanned horizontally, vertically, then along the ascending
    /// and descending diagonals; the first run found ends the scan.
    pub fn winning_move(&self, player: Player) -> bool {
        let piece = player.to_cell();

        self.check_horizontal(piece)
            || self.check_vertical(piece)
            || self.check_diagonal_up(piece)
            || self.check_diagonal_down(piece)
    }

    /// True when the four cells starting at `(row, col)` and stepping by
    /// `(d_row, d_col)` all hold `piece`. The caller keeps the run on the board.
    fn run_of_four(&self, row: usize, col: usize, d_row: isize, d_col: isize, piece: Cell) -> bool {
        (0..CONNECT as isize).all(|i| {
            let r = (row as isize + i * d_row) as usize;
            let c = (col as isize + i * d_col) as usize;
            self.cells[r][c] == piece
        })
    }

    fn check_horizontal(&self, piece: Cell) -> bool {
        (0..ROWS).any(|row| (0..=COLS - CONNECT).any(|col| self.run_of_four(row, col, 0, 1, piece)))
    }

    fn check_vertical(&self, piece: Cell) -> bool {
        (0..=ROWS - CONNECT).any(|row| (0..COLS).any(|col| self.run_of_four(row, col, 1, 0, piece)))
    }

    /// Bottom-left to top-right, /
    fn check_diagonal_up(&self, piece: Cell) -> bool {
        (0..=ROWS - CONNECT)
            .any(|row| (0..=COLS - CONNECT).any(|col| self.run_of_four(row, col, 1, 1, piece)))
    }

    /// Top-left to bottom-right, \
    fn check_diagonal_down(&self, piece: Cell) -> bool {
        (CONNECT - 1..ROWS)
            .any(|row| (0..=COLS - CONNECT).any(|col| self.run_of_four(row, col, -1, 1, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the top row first, so the board reads the way it stands.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line: Vec<&str> = self.cells[row]
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::PlayerOne => "X",
                    Cell::PlayerTwo => "O",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}
