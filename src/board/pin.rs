//! Pin detection (spec.md §4.4 "Pin detection (`is_locked`)").
//!
//! Direction table, compass order starting at up and rotating
//! clockwise: 0=up, 1=up-right, 2=right, 3=down-right, 4=down,
//! 5=down-left, 6=left, 7=up-left. "Opposite" is `(i + 4) % 8`;
//! "diagonal" is odd `i`.

use super::{Board, Coord, Piece};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

fn step(c: Coord, dir: (i32, i32)) -> Coord {
    Coord::new(c.row + dir.0, c.col + dir.1)
}

fn first_occupied(board: &Board, from: Coord, dir: (i32, i32)) -> Option<Coord> {
    let mut cur = step(from, dir);
    while cur.in_range() {
        if !board.get(cur).is_empty() {
            return Some(cur);
        }
        cur = step(cur, dir);
    }
    None
}

/// Scan from `src` in `dir` (the ray opposite the one the king was
/// found on) until either `dst` (the move's destination — stops here
/// whether or not it is occupied, so sliding *along* the pin line is
/// never flagged) or another occupied square. When the stop is at
/// `dst` and it *is* occupied, the moving piece is capturing the
/// would-be attacker there, so the scan continues one more square to
/// look for a second attacker behind it.
fn terminal_piece(board: &Board, src: Coord, dst: Coord, dir: (i32, i32)) -> Option<Coord> {
    let mut cur = step(src, dir);
    loop {
        if !cur.in_range() {
            return None;
        }
        if cur == dst {
            let cell = board.get(cur);
            if cell.is_empty() {
                return None;
            }
            let behind = step(cur, dir);
            return (behind.in_range() && !board.get(behind).is_empty()).then_some(behind);
        }
        if !board.get(cur).is_empty() {
            return Some(cur);
        }
        cur = step(cur, dir);
    }
}

/// Is the piece at `src` pinned against its king such that moving it
/// to `dst` is illegal?
pub fn is_locked(board: &Board, src: Coord, dst: Coord, is_white: bool) -> bool {
    for (i, dir) in DIRECTIONS.iter().enumerate() {
        let Some(first) = first_occupied(board, src, *dir) else {
            continue;
        };
        let first_cell = board.get(first);
        if first_cell.piece != Some(Piece::K) || first_cell.is_white != is_white {
            continue;
        }

        let opposite = DIRECTIONS[(i + 4) % 8];
        let Some(terminal) = terminal_piece(board, src, dst, opposite) else {
            continue;
        };
        let terminal_cell = board.get(terminal);
        if terminal_cell.is_white == is_white {
            continue;
        }

        let on_straight_ray = i % 2 == 0;
        let pinning = match terminal_cell.piece {
            Some(Piece::Q) => true,
            Some(Piece::R) => on_straight_ray,
            Some(Piece::B) => !on_straight_ray,
            _ => false,
        };
        if pinning {
            return true;
        }
    }
    false
}
