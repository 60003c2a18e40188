//! Candidate enumeration, legality testing, ambiguity resolution, and
//! move application (spec.md §4.4).

use crate::error::BoardError;

use super::motion::{self, MoveKind};
use super::pin;
use super::{Board, Cell, Coord, Piece, SquareHint};

/// Enumerate every square a source hint could resolve to, restricted
/// to squares actually holding `piece` of `is_white`'s color.
fn source_candidates(board: &Board, hint: SquareHint, piece: Piece, is_white: bool) -> Vec<Coord> {
    let matches = |c: Coord| {
        let cell = board.get(c);
        cell.piece == Some(piece) && cell.is_white == is_white
    };
    match (hint.row, hint.col) {
        (Some(row), Some(col)) => {
            let c = Coord::new(row, col);
            matches(c).then_some(c).into_iter().collect()
        }
        (None, Some(col)) => (0..8)
            .map(|row| Coord::new(row, col))
            .filter(|&c| matches(c))
            .collect(),
        (Some(row), None) => (0..8)
            .map(|col| Coord::new(row, col))
            .filter(|&c| matches(c))
            .collect(),
        (None, None) => board.occupied_squares().filter(|&c| matches(c)).collect(),
    }
}

/// Enumerate every square a destination hint could resolve to,
/// restricted to squares that are a valid landing for the move's
/// capture flag.
fn destination_candidates(board: &Board, hint: SquareHint, capture: bool, is_white: bool) -> Vec<Coord> {
    let landable = |c: Coord| {
        let cell = board.get(c);
        if capture {
            // En-passant destinations are empty; the fuller check
            // happens in the per-piece predicate, so here we only
            // reject squares occupied by a friendly piece.
            cell.is_empty() || cell.is_white != is_white
        } else {
            cell.is_empty()
        }
    };
    match (hint.row, hint.col) {
        (Some(row), Some(col)) => vec![Coord::new(row, col)],
        (None, Some(col)) => (0..8)
            .map(|row| Coord::new(row, col))
            .filter(|&c| landable(c))
            .collect(),
        (Some(row), None) => (0..8)
            .map(|col| Coord::new(row, col))
            .filter(|&c| landable(c))
            .collect(),
        (None, None) => (0..8)
            .flat_map(|row| (0..8).map(move |col| Coord::new(row, col)))
            .filter(|&c| landable(c))
            .collect(),
    }
}

/// A single fully-resolved, legal `(src, dst)` pair with the shape of
/// move it turned out to be.
struct Resolution {
    src: Coord,
    dst: Coord,
    kind: MoveKind,
}

fn legal_resolutions(
    board: &Board,
    piece: Piece,
    is_white: bool,
    capture: bool,
    src_hint: SquareHint,
    dst_hint: SquareHint,
) -> Vec<Resolution> {
    let sources = source_candidates(board, src_hint, piece, is_white);
    let destinations = destination_candidates(board, dst_hint, capture, is_white);

    let mut out = Vec::new();
    for &src in &sources {
        for &dst in &destinations {
            if pin::is_locked(board, src, dst, is_white) {
                continue;
            }
            if let Some(kind) = motion::piece_shape(board, piece, src, dst, is_white, capture) {
                out.push(Resolution { src, dst, kind });
            }
        }
    }
    out
}

/// Resolve and apply a `NextMove`-shaped half-move. Requires exactly
/// one legal `(src, dst)` resolution (spec.md §4.4 "Ambiguity
/// policy").
pub fn resolve_and_apply(
    board: &mut Board,
    piece: Piece,
    is_white: bool,
    capture: bool,
    src_hint: SquareHint,
    dst_hint: SquareHint,
    promote_piece: Option<Piece>,
) -> Result<(), BoardError> {
    let mut resolutions = legal_resolutions(board, piece, is_white, capture, src_hint, dst_hint);
    match resolutions.len() {
        0 => Err(BoardError::NoLegalResolution),
        1 => {
            let Resolution { src, dst, kind } = resolutions.remove(0);
            apply_resolved(board, piece, is_white, promote_piece, src, dst, kind);
            Ok(())
        }
        count => Err(BoardError::AmbiguousResolution { count }),
    }
}

fn apply_resolved(
    board: &mut Board,
    piece: Piece,
    is_white: bool,
    promote_piece: Option<Piece>,
    src: Coord,
    dst: Coord,
    kind: MoveKind,
) {
    board.clear_double_move_flags();
    let landed_piece = promote_piece.unwrap_or(piece);
    let mut landed = Cell::occupied(landed_piece, is_white);
    if matches!(kind, MoveKind::DoublePush) {
        landed.double_move = true;
    }
    board.set(dst, landed);
    board.set(src, Cell::EMPTY);
    if let MoveKind::EnPassant { captured } = kind {
        board.set(captured, Cell::EMPTY);
    }
}

/// Squares that must be empty for castling, and the two (from, to)
/// pairs to move — king then rook.
fn castle_squares(is_white: bool, kingside: bool) -> (Vec<Coord>, [(Coord, Coord); 2]) {
    let row = if is_white { 7 } else { 0 };
    let at = |col| Coord::new(row, col);
    if kingside {
        (
            vec![at(5), at(6)],
            [(at(4), at(6)), (at(7), at(5))],
        )
    } else {
        (
            vec![at(1), at(2), at(3)],
            [(at(4), at(2)), (at(0), at(3))],
        )
    }
}

/// Apply `KingSideCastle`/`QueenSideCastle`. Only checks that the
/// intermediate squares are empty — it does not verify they are
/// unattacked (spec.md §9, "do not guess" list).
pub fn apply_castle(board: &mut Board, is_white: bool, kingside: bool) -> Result<(), BoardError> {
    let (between, moves) = castle_squares(is_white, kingside);
    if between.iter().any(|&c| !board.get(c).is_empty()) {
        return Err(BoardError::CastlingBlocked);
    }
    board.clear_double_move_flags();
    for (from, to) in moves {
        let cell = board.get(from);
        board.set(to, cell);
        board.set(from, Cell::EMPTY);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_double_push_then_knight_hop() {
        let mut board = Board::startpos();
        resolve_and_apply(
            &mut board,
            Piece::P,
            true,
            false,
            SquareHint::default(),
            SquareHint::known(4, 4),
            None,
        )
        .unwrap();
        assert!(board.get(Coord::new(4, 4)).double_move);

        resolve_and_apply(
            &mut board,
            Piece::P,
            false,
            false,
            SquareHint::default(),
            SquareHint::known(3, 4),
            None,
        )
        .unwrap();

        resolve_and_apply(
            &mut board,
            Piece::N,
            true,
            false,
            SquareHint::default(),
            SquareHint::known(5, 5),
            None,
        )
        .unwrap();

        assert_eq!(board.get(Coord::new(5, 5)).piece, Some(Piece::N));
        assert!(board.get(Coord::new(7, 6)).is_empty());
        assert!(!board.get(Coord::new(4, 4)).double_move);
    }

    #[test]
    fn kingside_castle_moves_king_and_rook() {
        let mut board = Board::clear();
        board.set(Coord::new(7, 4), Cell::occupied(Piece::K, true));
        board.set(Coord::new(7, 7), Cell::occupied(Piece::R, true));
        apply_castle(&mut board, true, true).unwrap();
        assert_eq!(board.get(Coord::new(7, 6)).piece, Some(Piece::K));
        assert_eq!(board.get(Coord::new(7, 5)).piece, Some(Piece::R));
        assert!(board.get(Coord::new(7, 4)).is_empty());
        assert!(board.get(Coord::new(7, 7)).is_empty());
    }

    #[test]
    fn castle_blocked_is_rejected() {
        let mut board = Board::clear();
        board.set(Coord::new(7, 4), Cell::occupied(Piece::K, true));
        board.set(Coord::new(7, 7), Cell::occupied(Piece::R, true));
        board.set(Coord::new(7, 5), Cell::occupied(Piece::B, true));
        assert_eq!(
            apply_castle(&mut board, true, true),
            Err(BoardError::CastlingBlocked)
        );
    }

    #[test]
    fn ambiguous_move_is_rejected() {
        let mut board = Board::clear();
        board.set(Coord::new(7, 2), Cell::occupied(Piece::N, true));
        board.set(Coord::new(7, 4), Cell::occupied(Piece::N, true));
        let err = resolve_and_apply(
            &mut board,
            Piece::N,
            true,
            false,
            SquareHint::default(),
            SquareHint::known(5, 3),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::AmbiguousResolution { count: 2 }));
    }
}
