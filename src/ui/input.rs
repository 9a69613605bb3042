use crate::game::COLS;

/// Map a horizontal pointer position to a board column.
///
/// `origin_x` is the first position of column 0 and every column spans
/// `cell_width` positions. Positions left of the board or past the last
/// column give `None`.
pub fn column_at(x: u16, origin_x: u16, cell_width: u16) -> Option<usize> {
    if cell_width == 0 {
        return None;
    }
    let offset = x.checked_sub(origin_x)?;
    let col = usize::from(offset / cell_width);
    (col < COLS).then_some(col)
}

/// Move a column selection by `delta`, staying on the board.
pub fn shift_column(col: usize, delta: isize) -> usize {
    col.saturating_add_signed(delta).min(COLS - 1)
}
