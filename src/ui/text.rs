//! Line-oriented play over any reader/writer pair, printing the board after
//! every move.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::error::MoveError;
use crate::game::{GameOutcome, Session, COLS};

/// Play `session` to completion from typed column numbers (1-based).
///
/// Returns the outcome, or `None` when the input ends or the players quit first.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> io::Result<Option<GameOutcome>> {
    writeln!(out, "{}", session.board())?;
    prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let col = match entry.parse::<usize>() {
            Ok(n) if (1..=COLS).contains(&n) => n - 1,
            _ => {
                writeln!(out, "Enter a column from 1 to {COLS}, or q to quit")?;
                prompt(session, &mut out)?;
                continue;
            }
        };

        match session.play(col) {
            Ok(placement) => {
                writeln!(out, "{}", session.board())?;
                match placement.outcome {
                    Some(GameOutcome::Winner(player)) => {
                        writeln!(out, "{} Wins!!", player.name())?;
                        return Ok(placement.outcome);
                    }
                    Some(GameOutcome::Draw) => {
                        writeln!(out, "It's a draw!")?;
                        return Ok(placement.outcome);
                    }
                    None => {}
                }
            }
            Err(MoveError::ColumnFull(_)) => {
                writeln!(out, "Column {entry} is full")?;
            }
            Err(err) => {
                debug!("rejected move {entry}: {err}");
                writeln!(out, "{err}")?;
            }
        }
        prompt(session, &mut out)?;
    }

    Ok(None)
}

fn prompt<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    write!(out, "{} to move: ", session.current_player().name())?;
    out.flush()
}
