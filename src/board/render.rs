//! ASCII board rendering (spec.md §6).
//!
//! One line per rank, ranks printed top (8) to bottom (1), columns
//! separated by `|`. An empty square is two spaces; an occupied square
//! is a lowercase `w`/`b` color tag followed by the piece's letter.

use std::fmt;

use super::{Board, Coord};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let cells: Vec<String> = (0..8)
                .map(|col| cell_text(self, Coord::new(row, col)))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn cell_text(board: &Board, c: Coord) -> String {
    let cell = board.get(c);
    match cell.piece {
        None => "  ".to_string(),
        Some(piece) => {
            let color = if cell.is_white { 'w' } else { 'b' };
            format!("{color}{}", piece.letter())
        }
    }
}
