//! Integration scenarios (spec.md §8), driven through the full
//! lexer -> grammar driver -> move interpreter -> board engine
//! pipeline against the rendered board's exact textual contract.

use mainline::board::{Board, Cell, Coord, Piece};
use mainline::session::Session;

fn replay(pgn: &str) -> Board {
    Session::new(pgn.as_bytes())
        .run()
        .unwrap_or_else(|e| panic!("replay of {pgn:?} failed: {e}"))
}

fn cell_text(board: &Board, row: i32, col: i32) -> String {
    let lines: Vec<String> = board.to_string().lines().map(String::from).collect();
    lines[row as usize]
        .split('|')
        .nth(col as usize)
        .unwrap()
        .to_string()
}

#[test]
fn scenario_1_pawn_double_push_then_simple_move() {
    let board = replay("1. e4 e5 2. Nf3");
    assert_eq!(cell_text(&board, 4, 4), "wP");
    assert_eq!(cell_text(&board, 3, 4), "bP");
    assert_eq!(cell_text(&board, 5, 5), "wN");
    assert_eq!(cell_text(&board, 6, 4), "  ");
    assert_eq!(cell_text(&board, 1, 4), "  ");
    assert_eq!(cell_text(&board, 7, 6), "  ");
}

#[test]
fn scenario_2_en_passant_capture() {
    let mut start = Board::clear();
    start.set(Coord::new(1, 1), Cell::occupied(Piece::P, false));
    start.set(Coord::new(3, 2), Cell::occupied(Piece::P, true));

    // Replay against a custom starting board by applying moves directly
    // through the same engine entry points the session uses.
    mainline::board::apply::resolve_and_apply(
        &mut start,
        Piece::P,
        false,
        false,
        Default::default(),
        mainline::board::SquareHint::known(3, 1),
        None,
    )
    .unwrap();
    assert!(start.get(Coord::new(3, 1)).double_move);

    mainline::board::apply::resolve_and_apply(
        &mut start,
        Piece::P,
        true,
        true,
        mainline::board::SquareHint { row: None, col: Some(2) },
        mainline::board::SquareHint::known(2, 1),
        None,
    )
    .unwrap();

    assert_eq!(start.get(Coord::new(2, 1)).piece, Some(Piece::P));
    assert!(start.get(Coord::new(3, 2)).is_empty());
    assert!(start.get(Coord::new(3, 1)).is_empty());
    assert!(start.cell_with_double_move().is_none());
}

#[test]
fn scenario_3_promotion_syntax_equivalence() {
    for text in ["b8=Q", "b8/Q", "b8(Q)", "b8Q"] {
        let mut board = Board::clear();
        board.set(Coord::new(1, 1), Cell::occupied(Piece::P, true));
        let descriptor = mainline::movetext::interpret(text, true).unwrap();
        let (piece, capture, src_hint, dst, promote_piece) = match descriptor {
            mainline::movetext::MoveDescriptor::NextMove {
                piece,
                capture,
                src_hint,
                dst,
                promote_piece,
                ..
            } => (piece, capture, src_hint, dst, promote_piece),
            other => panic!("unexpected descriptor for {text:?}: {other:?}"),
        };
        mainline::board::apply::resolve_and_apply(
            &mut board, piece, true, capture, src_hint, dst, promote_piece,
        )
        .unwrap();
        assert_eq!(board.get(Coord::new(0, 1)).piece, Some(Piece::Q), "text = {text}");
        assert!(board.get(Coord::new(1, 1)).is_empty(), "text = {text}");
    }
}

#[test]
fn scenario_4_kingside_castling() {
    let board = replay("1. Nf3 Nc6 2. Bc4 Bc5 3. O-O");
    assert_eq!(cell_text(&board, 7, 6), "wK");
    assert_eq!(cell_text(&board, 7, 5), "wR");
    assert_eq!(cell_text(&board, 7, 4), "  ");
    assert_eq!(cell_text(&board, 7, 7), "  ");
}

#[test]
fn scenario_5_pin_detection_disambiguates() {
    let mut board = Board::clear();
    board.set(Coord::new(7, 2), Cell::occupied(Piece::N, true));
    board.set(Coord::new(7, 3), Cell::occupied(Piece::K, true));
    board.set(Coord::new(7, 4), Cell::occupied(Piece::N, true));
    board.set(Coord::new(7, 0), Cell::occupied(Piece::R, false));

    let descriptor = mainline::movetext::interpret("Nd3", true).unwrap();
    let (src_hint, dst) = match descriptor {
        mainline::movetext::MoveDescriptor::NextMove { src_hint, dst, .. } => (src_hint, dst),
        other => panic!("unexpected descriptor: {other:?}"),
    };
    mainline::board::apply::resolve_and_apply(
        &mut board, Piece::N, true, false, src_hint, dst, None,
    )
    .unwrap();

    assert_eq!(board.get(Coord::new(5, 3)).piece, Some(Piece::N));
    assert!(board.get(Coord::new(7, 4)).is_empty());
    assert_eq!(board.get(Coord::new(7, 2)).piece, Some(Piece::N));
}

#[test]
fn scenario_6_rav_and_comment_skipping() {
    let with_rav_and_comment = replay("1. e4 (1. d4 d5) {Ruy Lopez} e5");
    let bare = replay("1. e4 e5");
    assert_eq!(with_rav_and_comment.to_string(), bare.to_string());
}
