//! Session orchestration (spec.md §4.5): wires lexer -> grammar driver
//! -> move interpreter -> board engine over a single input stream and
//! folds the resulting descriptors into a final [`Board`].

use std::io::Read;

use tracing::{debug, info, instrument};

use crate::board::{apply, Board};
use crate::error::ReplayError;
use crate::grammar::GrammarDriver;
use crate::lexer::Lexer;
use crate::movetext::MoveDescriptor;

/// Owns the byte source for its whole lifetime and drives it to
/// completion exactly once.
pub struct Session<R> {
    driver: GrammarDriver<R>,
    board: Board,
}

impl<R: Read> Session<R> {
    pub fn new(source: R) -> Self {
        Self {
            driver: GrammarDriver::new(Lexer::new(source)),
            board: Board::startpos(),
        }
    }

    /// Replay every half-move in the mainline, stopping at the first
    /// `Finish` descriptor or the first error, and return the final
    /// board.
    #[instrument(skip(self), name = "replay_session")]
    pub fn run(mut self) -> Result<Board, ReplayError> {
        info!("starting replay");
        let mut applied = 0u32;
        loop {
            let Some(descriptor) = self.driver.next() else {
                debug!(applied, "input exhausted without an explicit Finish marker");
                break;
            };
            let descriptor = descriptor?;
            match descriptor {
                MoveDescriptor::NextMove {
                    piece,
                    is_white,
                    capture,
                    src_hint,
                    dst,
                    promote_piece,
                    check,
                    checkmate,
                } => {
                    apply::resolve_and_apply(
                        &mut self.board,
                        piece,
                        is_white,
                        capture,
                        src_hint,
                        dst,
                        promote_piece,
                    )?;
                    applied += 1;
                    debug!(
                        applied,
                        is_white, capture, check, checkmate, "applied move"
                    );
                }
                MoveDescriptor::KingSideCastle { is_white } => {
                    apply::apply_castle(&mut self.board, is_white, true)?;
                    applied += 1;
                    debug!(applied, is_white, "applied kingside castle");
                }
                MoveDescriptor::QueenSideCastle { is_white } => {
                    apply::apply_castle(&mut self.board, is_white, false)?;
                    applied += 1;
                    debug!(applied, is_white, "applied queenside castle");
                }
                MoveDescriptor::Finish { marker } => {
                    info!(applied, ?marker, "replay finished");
                    break;
                }
                MoveDescriptor::Ignore => {
                    debug!("ignored a stray e.p. remnant");
                }
            }
        }
        Ok(self.board)
    }
}
