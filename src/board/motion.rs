//! Per-piece motion predicates (spec.md §4.4 "Per-piece motion
//! predicates"). These only decide whether the *shape* of a move is
//! legal for a piece and whether its destination is a valid landing —
//! pin detection (see [`super::pin`]) is a separate, prior check.

use super::{Board, Cell, Coord, Piece};

/// What kind of pawn move this was, for [`super::apply`] to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePush,
    EnPassant { captured: Coord },
}

/// A destination is a valid landing for a non-capture if empty, or for
/// a capture if occupied by an opposite-color, non-king piece.
fn valid_landing(board: &Board, dst: Coord, capture: bool, is_white: bool) -> bool {
    let cell = board.get(dst);
    if capture {
        !cell.is_empty() && cell.is_white != is_white && cell.piece != Some(Piece::K)
    } else {
        cell.is_empty()
    }
}

fn path_clear(board: &Board, src: Coord, dst: Coord, step: (i32, i32)) -> bool {
    let (dr, dc) = step;
    let mut cur = Coord::new(src.row + dr, src.col + dc);
    while cur != dst {
        if !board.get(cur).is_empty() {
            return false;
        }
        cur = Coord::new(cur.row + dr, cur.col + dc);
    }
    true
}

fn signum(x: i32) -> i32 {
    x.cmp(&0) as i32
}

fn knight_shape(src: Coord, dst: Coord) -> bool {
    let dx = (dst.row - src.row).abs();
    let dy = (dst.col - src.col).abs();
    matches!((dx, dy), (1, 2) | (2, 1))
}

fn king_shape(src: Coord, dst: Coord) -> bool {
    let dx = (dst.row - src.row).abs();
    let dy = (dst.col - src.col).abs();
    dx.max(dy) == 1
}

fn rook_shape_and_path(board: &Board, src: Coord, dst: Coord) -> bool {
    if src == dst {
        return false;
    }
    if src.row == dst.row {
        path_clear(board, src, dst, (0, signum(dst.col - src.col)))
    } else if src.col == dst.col {
        path_clear(board, src, dst, (signum(dst.row - src.row), 0))
    } else {
        false
    }
}

fn bishop_shape_and_path(board: &Board, src: Coord, dst: Coord) -> bool {
    let dx = dst.row - src.row;
    let dy = dst.col - src.col;
    if dx.abs() != dy.abs() || dx == 0 {
        return false;
    }
    path_clear(board, src, dst, (signum(dx), signum(dy)))
}

/// Pawn forward distance, signed so it is always positive for a
/// forward move: for white the advancing direction is toward row 0,
/// for black toward row 7.
fn pawn_forward(src: Coord, dst: Coord, is_white: bool) -> i32 {
    if is_white {
        src.row - dst.row
    } else {
        dst.row - src.row
    }
}

fn pawn_start_row(is_white: bool) -> i32 {
    if is_white { 6 } else { 1 }
}

fn pawn_shape(
    board: &Board,
    src: Coord,
    dst: Coord,
    is_white: bool,
    capture: bool,
) -> Option<MoveKind> {
    let dx = pawn_forward(src, dst, is_white);
    let dy = (dst.col - src.col).abs();

    if capture {
        if dx != 1 || dy != 1 {
            return None;
        }
        let target = board.get(dst);
        if !target.is_empty() {
            return valid_landing(board, dst, true, is_white).then_some(MoveKind::Normal);
        }
        // Empty destination on a pawn capture: only en passant is legal.
        let captured = Coord::new(src.row, dst.col);
        let captured_cell = board.get(captured);
        if captured_cell.is_empty()
            || captured_cell.is_white == is_white
            || !captured_cell.double_move
        {
            return None;
        }
        Some(MoveKind::EnPassant { captured })
    } else {
        if dy != 0 {
            return None;
        }
        match dx {
            1 if board.get(dst).is_empty() => Some(MoveKind::Normal),
            2 if src.row == pawn_start_row(is_white) => {
                let mid = Coord::new((src.row + dst.row) / 2, src.col);
                (board.get(mid).is_empty() && board.get(dst).is_empty())
                    .then_some(MoveKind::DoublePush)
            }
            _ => None,
        }
    }
}

/// Top-level dispatch: is this `(src, dst)` pair a legal shape for
/// `piece`, ignoring pins? `Some` carries the kind of move it is (plain,
/// double push, or en passant) for [`super::apply`] to act on.
pub fn piece_shape(
    board: &Board,
    piece: Piece,
    src: Coord,
    dst: Coord,
    is_white: bool,
    capture: bool,
) -> Option<MoveKind> {
    match piece {
        Piece::P => pawn_shape(board, src, dst, is_white, capture),
        Piece::N => (knight_shape(src, dst) && valid_landing(board, dst, capture, is_white))
            .then_some(MoveKind::Normal),
        Piece::B => {
            (bishop_shape_and_path(board, src, dst)
                && valid_landing(board, dst, capture, is_white))
            .then_some(MoveKind::Normal)
        }
        Piece::R => {
            (rook_shape_and_path(board, src, dst) && valid_landing(board, dst, capture, is_white))
                .then_some(MoveKind::Normal)
        }
        Piece::Q => {
            let shape = rook_shape_and_path(board, src, dst) || bishop_shape_and_path(board, src, dst);
            (shape && valid_landing(board, dst, capture, is_white)).then_some(MoveKind::Normal)
        }
        Piece::K => {
            (king_shape(src, dst) && valid_landing(board, dst, capture, is_white))
                .then_some(MoveKind::Normal)
        }
    }
}
