//! Move interpreter (spec.md §4.3): turns a half-move's SAN text into a
//! structured [`MoveDescriptor`] by scanning right-to-left. Does not
//! touch the board — it knows nothing about where pieces actually are.

use crate::board::{Coord, Piece, SquareHint};
use crate::error::InterpretError;

/// How a game ended, carried by a `Finish` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishMarker {
    WhiteWon,
    BlackWon,
    Draw,
    Manual,
}

/// The structured result of interpreting one half-move's SAN text
/// (spec.md §3 "Move descriptor").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveDescriptor {
    NextMove {
        piece: Piece,
        is_white: bool,
        capture: bool,
        check: bool,
        checkmate: bool,
        src_hint: SquareHint,
        dst: SquareHint,
        promote_piece: Option<Piece>,
    },
    KingSideCastle {
        is_white: bool,
    },
    QueenSideCastle {
        is_white: bool,
    },
    Finish {
        marker: FinishMarker,
    },
    /// Recognized but semantically null — a lone `e` or `p` left over
    /// from an `e.p.` annotation.
    Ignore,
}

/// A cursor over a `&str`'s characters, scanning from the end. Peeking
/// and popping operate on `char`s, not bytes, but SAN text is ASCII so
/// the two coincide.
struct Tail<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> Tail<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }

    fn peek_last(&self) -> Option<char> {
        self.chars.clone().next_back()
    }

    fn pop_last(&mut self) -> Option<char> {
        self.chars.next_back()
    }

    fn remainder(&self) -> &'a str {
        self.chars.as_str()
    }
}

/// Interpret one half-move's textual symbol (spec.md §4.3). `is_white`
/// is the side-to-move flag the grammar driver is tracking.
pub fn interpret(text: &str, is_white: bool) -> Result<MoveDescriptor, InterpretError> {
    if text.is_empty() {
        return Err(InterpretError::Empty);
    }
    if text == "e" || text == "p" {
        return Ok(MoveDescriptor::Ignore);
    }
    if text == "O-O" {
        return Ok(MoveDescriptor::KingSideCastle { is_white });
    }
    if text == "O-O-O" {
        return Ok(MoveDescriptor::QueenSideCastle { is_white });
    }
    match text {
        "1-0" => return Ok(MoveDescriptor::Finish { marker: FinishMarker::WhiteWon }),
        "0-1" => return Ok(MoveDescriptor::Finish { marker: FinishMarker::BlackWon }),
        "1/2-1/2" => return Ok(MoveDescriptor::Finish { marker: FinishMarker::Draw }),
        _ => {}
    }

    let mut tail = Tail::new(text);

    // (a) up to two suffix flags: # + :
    let mut checkmate = false;
    let mut check = false;
    let mut capture = false;
    for _ in 0..2 {
        match tail.peek_last() {
            Some('#') => {
                checkmate = true;
                tail.pop_last();
            }
            Some('+') => {
                check = true;
                tail.pop_last();
            }
            Some(':') => {
                capture = true;
                tail.pop_last();
            }
            _ => break,
        }
    }

    // (b) optional closing ')' of the alternate promotion bracket.
    if tail.peek_last() == Some(')') {
        tail.pop_last();
    }

    // (c) optional promotion piece, then optional separator.
    let mut promote_piece = None;
    if let Some(c) = tail.peek_last() {
        if let Some(p) = Piece::from_letter(c) {
            if p != Piece::P {
                promote_piece = Some(p);
                tail.pop_last();
                if matches!(tail.peek_last(), Some('=') | Some('/') | Some('(')) {
                    tail.pop_last();
                }
            }
        }
    }

    // (d) destination: optional rank digit, then optional file letter.
    let dst_rank = take_rank(&mut tail);
    let dst_file = take_file(&mut tail);
    let dst = SquareHint {
        row: dst_rank,
        col: dst_file,
    };
    if dst.row.is_none() && dst.col.is_none() {
        return Err(InterpretError::MissingDestination {
            text: text.to_string(),
        });
    }

    // (e) nothing left: implicit pawn, done.
    if tail.remainder().is_empty() {
        return Ok(MoveDescriptor::NextMove {
            piece: Piece::P,
            is_white,
            capture,
            check,
            checkmate,
            src_hint: SquareHint::default(),
            dst,
            promote_piece,
        });
    }

    // (f) a single 'x' or ':' capture marker.
    if matches!(tail.peek_last(), Some('x') | Some(':')) {
        capture = true;
        tail.pop_last();
    }

    // (g) source hint, parsed the same way as the destination.
    let src_rank = take_rank(&mut tail);
    let src_file = take_file(&mut tail);
    let src_hint = SquareHint {
        row: src_rank,
        col: src_file,
    };

    // (h) one more leading piece letter, else implicit pawn.
    let piece = match tail.peek_last() {
        Some(c) => match Piece::from_letter(c) {
            Some(p) => {
                tail.pop_last();
                p
            }
            None => {
                return Err(InterpretError::UnknownPiece {
                    text: text.to_string(),
                    found: c,
                });
            }
        },
        None => Piece::P,
    };

    if !tail.remainder().is_empty() {
        return Err(InterpretError::TrailingCharacters {
            text: text.to_string(),
            leftover: tail.remainder().to_string(),
        });
    }

    Ok(MoveDescriptor::NextMove {
        piece,
        is_white,
        capture,
        check,
        checkmate,
        src_hint,
        dst,
        promote_piece,
    })
}

fn take_rank(tail: &mut Tail<'_>) -> Option<i32> {
    match tail.peek_last() {
        Some(c) if ('1'..='8').contains(&c) => {
            tail.pop_last();
            Some(Coord::row_from_rank_digit(c))
        }
        _ => None,
    }
}

fn take_file(tail: &mut Tail<'_>) -> Option<i32> {
    match tail.peek_last() {
        Some(c) if ('a'..='h').contains(&c) => {
            tail.pop_last();
            Some(Coord::col_from_file_letter(c))
        }
        _ => None,
    }
}
