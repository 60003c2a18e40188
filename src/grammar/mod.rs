//! PGN grammar driver (spec.md §4.2): an explicit finite automaton over
//! the atom stream that emits zero or one move descriptor per atom,
//! eliding RAVs (parenthesized variations) out-of-band via a depth
//! counter and handing `SYMBOL` atoms off to [`crate::movetext`].

use std::io::Read;

use crate::error::{GrammarError, ReplayError};
use crate::lexer::{Atom, Lexer};
use crate::movetext::{self, MoveDescriptor};

/// The driver's internal state (spec.md §4.2 "States and transitions").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrammarState {
    Init,
    HeaderOpen,
    HeaderName,
    HeaderValue,
    HeaderClose,
    NumberIndication,
    Period,
    Move,
    Finished,
}

impl GrammarState {
    fn name(self) -> &'static str {
        match self {
            GrammarState::Init => "Init",
            GrammarState::HeaderOpen => "HeaderOpen",
            GrammarState::HeaderName => "HeaderName",
            GrammarState::HeaderValue => "HeaderValue",
            GrammarState::HeaderClose => "HeaderClose",
            GrammarState::NumberIndication => "NumberIndication",
            GrammarState::Period => "Period",
            GrammarState::Move => "Move",
            GrammarState::Finished => "Finished",
        }
    }
}

/// Drives the atom stream into a stream of [`MoveDescriptor`]s.
pub struct GrammarDriver<R> {
    lexer: Lexer<R>,
    state: GrammarState,
    paren_depth: u32,
    white_to_move: bool,
    done: bool,
}

impl<R: Read> GrammarDriver<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexer,
            state: GrammarState::Init,
            paren_depth: 0,
            white_to_move: true,
            done: false,
        }
    }

    /// Advance until a descriptor is produced, the stream ends, or an
    /// error occurs. Atoms that merely drive a state transition
    /// without emitting (e.g. `LBRACKET`) are consumed silently.
    fn advance(&mut self) -> Result<Option<MoveDescriptor>, ReplayError> {
        loop {
            let Some(atom) = self.lexer.next() else {
                return Ok(None);
            };
            let atom = atom?;

            // Dropped before the automaton ever sees them (spec.md
            // §4.2): they carry no value of interest downstream.
            if matches!(
                atom,
                Atom::BraceComment
                    | Atom::LineComment
                    | Atom::EscapeLine
                    | Atom::NumericAnnotation
            ) {
                continue;
            }

            if let Atom::LParen = atom {
                self.paren_depth += 1;
                continue;
            }
            if let Atom::RParen = atom {
                self.paren_depth = self
                    .paren_depth
                    .checked_sub(1)
                    .ok_or(GrammarError::UnbalancedParens)?;
                continue;
            }

            // Whether this specific atom, in this specific state, is a
            // transition into `Move` driven by a `SYMBOL` — every such
            // transition emits a descriptor, including the `Move` ->
            // `Move` self-loop on consecutive half-moves, since PGN
            // carries no separator atom between them.
            let from_state = self.state;
            let enters_move = matches!(
                (self.state, &atom),
                (
                    GrammarState::Init
                        | GrammarState::HeaderClose
                        | GrammarState::NumberIndication
                        | GrammarState::Period
                        | GrammarState::Move,
                    Atom::Symbol(_)
                )
            );

            match (self.state, &atom) {
                (GrammarState::Init, Atom::LBracket) => self.state = GrammarState::HeaderOpen,
                (GrammarState::Init, Atom::Integer(_)) => {
                    self.state = GrammarState::NumberIndication
                }
                (GrammarState::Init, Atom::Symbol(_)) => self.state = GrammarState::Move,
                (GrammarState::Init, Atom::Star) => self.state = GrammarState::Finished,

                (GrammarState::HeaderOpen, Atom::Symbol(_)) => {
                    self.state = GrammarState::HeaderName
                }
                (GrammarState::HeaderName, Atom::Str(_)) => {
                    self.state = GrammarState::HeaderValue
                }
                (GrammarState::HeaderValue, Atom::RBracket) => {
                    self.state = GrammarState::HeaderClose
                }

                (GrammarState::HeaderClose, Atom::LBracket) => {
                    self.state = GrammarState::HeaderOpen
                }
                (GrammarState::HeaderClose, Atom::Integer(_)) => {
                    self.state = GrammarState::NumberIndication
                }
                (GrammarState::HeaderClose, Atom::Symbol(_)) => self.state = GrammarState::Move,

                (GrammarState::NumberIndication, Atom::Period) => {
                    self.state = GrammarState::Period
                }
                (GrammarState::NumberIndication, Atom::Symbol(_)) => {
                    self.state = GrammarState::Move
                }

                (GrammarState::Period, Atom::Period) => self.state = GrammarState::Period,
                (GrammarState::Period, Atom::Symbol(_)) => self.state = GrammarState::Move,

                (GrammarState::Move, Atom::Symbol(_)) => self.state = GrammarState::Move,
                (GrammarState::Move, Atom::Integer(_)) => {
                    self.state = GrammarState::NumberIndication
                }
                (GrammarState::Move, Atom::Period) => {} // tolerated, no state change, no emit

                (_, Atom::Star) => self.state = GrammarState::Finished,

                _ => {
                    return Err(GrammarError::NoTransition {
                        state: from_state.name(),
                        atom: atom.tag().to_string(),
                    }
                    .into());
                }
            }

            if enters_move {
                // Elided inside a RAV: don't toggle the side-to-move
                // flag or interpret the text for a half-move that will
                // never be emitted (spec.md §3 — the flag toggles only
                // "on every emitted NextMove").
                if self.paren_depth != 0 {
                    continue;
                }
                let Atom::Symbol(text) = &atom else {
                    unreachable!("Move is only entered on a SYMBOL atom");
                };
                let mover_is_white = self.white_to_move;
                self.white_to_move = !self.white_to_move;
                let descriptor = movetext::interpret(text, mover_is_white)?;
                return Ok(Some(descriptor));
            }

            if self.state == GrammarState::Finished {
                if self.paren_depth == 0 {
                    return Ok(Some(MoveDescriptor::Finish {
                        marker: crate::movetext::FinishMarker::Manual,
                    }));
                }
                continue;
            }
        }
    }
}

impl<R: Read> Iterator for GrammarDriver<R> {
    type Item = Result<MoveDescriptor, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(d)) => {
                if matches!(d, MoveDescriptor::Finish { .. }) {
                    self.done = true;
                }
                Some(Ok(d))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
