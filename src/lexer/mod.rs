//! Character-level lexical scanner (spec.md §4.1).
//!
//! Exposes a lazy, restartable sequence of [`Atom`]s over anything
//! implementing [`std::io::Read`]. Horizontal whitespace, newlines and
//! tabs are skipped between atoms; the first non-separator character
//! picks an atom class from a fixed dispatch table, and that atom's
//! accept automaton (see [`automaton`]) runs until it terminates or the
//! stream ends.

pub mod automaton;

use std::io::Read;

use crate::error::LexError;
use automaton::{
    Automaton, BraceCommentAutomaton, EofOutcome, NumericGlyphAutomaton, Outcome, StringAutomaton,
    SymbolAutomaton, ToEndOfLineAutomaton,
};

/// A single lexical atom, tagged by class (spec.md §3 "Lexical atom").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    LBracket,
    RBracket,
    LParen,
    RParen,
    Str(String),
    Period,
    Star,
    BraceComment,
    LineComment,
    EscapeLine,
    NumericAnnotation,
    Symbol(String),
    Integer(String),
}

impl Atom {
    /// Stable tag used by the grammar driver's transition table and in
    /// error messages — never the atom's textual value.
    pub fn tag(&self) -> &'static str {
        match self {
            Atom::LBracket => "LBRACKET",
            Atom::RBracket => "RBRACKET",
            Atom::LParen => "LPAREN",
            Atom::RParen => "RPAREN",
            Atom::Str(_) => "STRING",
            Atom::Period => "PERIOD",
            Atom::Star => "STAR",
            Atom::BraceComment => "BRACE-COMMENT",
            Atom::LineComment => "LINE-COMMENT",
            Atom::EscapeLine => "ESCAPE-LINE",
            Atom::NumericAnnotation => "NUMERIC-ANNOTATION",
            Atom::Symbol(_) => "SYMBOL",
            Atom::Integer(_) => "INTEGER",
        }
    }
}

/// A one-character-pushback cursor over a byte stream, read as ASCII.
///
/// PGN movetext is ASCII apart from free-text header values, which this
/// crate only needs to scan for printability, not interpret — so bytes
/// are treated as their Latin-1 `char` equivalents rather than decoded
/// as UTF-8. The single-slot pushback is what lets an automaton's
/// `TerminatedNonconsumed` outcome re-feed a character to the next
/// atom without the stream being read twice.
struct CharSource<R> {
    bytes: std::io::Bytes<R>,
    pending: Option<char>,
    offset: usize,
}

impl<R: Read> CharSource<R> {
    fn new(inner: R) -> Self {
        Self {
            bytes: inner.bytes(),
            pending: None,
            offset: 0,
        }
    }

    fn next(&mut self) -> Result<Option<char>, LexError> {
        if let Some(c) = self.pending.take() {
            return Ok(Some(c));
        }
        match self.bytes.next() {
            None => Ok(None),
            Some(Ok(b)) => {
                self.offset += 1;
                Ok(Some(b as char))
            }
            Some(Err(e)) => Err(LexError::Io(e.to_string())),
        }
    }

    fn pushback(&mut self, c: char) {
        debug_assert!(self.pending.is_none(), "at most one character of pushback");
        self.pending = Some(c);
    }
}

/// The lexer itself: a lazy [`Iterator`] of atoms over a borrowed byte
/// stream.
pub struct Lexer<R> {
    source: CharSource<R>,
    done: bool,
}

impl<R: Read> Lexer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            source: CharSource::new(inner),
            done: false,
        }
    }

    fn skip_separators(&mut self) -> Result<(), LexError> {
        loop {
            match self.source.next()? {
                Some(c) if c == ' ' || c == '\t' || c == '\r' || c == '\n' => continue,
                Some(c) => {
                    self.source.pushback(c);
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    /// Run `automaton` to completion, returning the outcome-terminated
    /// text that was fed into it (automata decide internally what, if
    /// anything, they keep).
    fn drive<A: Automaton>(&mut self, mut automaton: A, start: usize) -> Result<A, LexError> {
        loop {
            match self.source.next()? {
                Some(c) => match automaton.step(c) {
                    Outcome::Consumed => continue,
                    Outcome::TerminatedConsumed => return Ok(automaton),
                    Outcome::TerminatedNonconsumed => {
                        self.source.pushback(c);
                        return Ok(automaton);
                    }
                    Outcome::Invalid => {
                        return Err(LexError::NonPrintableInString {
                            found: c as u8,
                            offset: self.source.offset,
                        });
                    }
                },
                None => {
                    return match automaton.on_eof() {
                        EofOutcome::Ok => Ok(automaton),
                        EofOutcome::Unterminated => Err(LexError::UnterminatedString { start }),
                    };
                }
            }
        }
    }

    /// Like [`Self::drive`], but for [`StringAutomaton`]: an `Invalid`
    /// outcome is either [`LexError::InvalidEscape`] (a `\` followed by
    /// a non-printable character) or [`LexError::NonPrintableInString`]
    /// (a bare non-printable character in the string body), per
    /// spec.md §4.1's "STRING" paragraph.
    fn drive_string(&mut self, start: usize) -> Result<StringAutomaton, LexError> {
        let mut automaton = StringAutomaton::default();
        loop {
            match self.source.next()? {
                Some(c) => match automaton.step(c) {
                    Outcome::Consumed => continue,
                    Outcome::TerminatedConsumed => return Ok(automaton),
                    Outcome::TerminatedNonconsumed => {
                        self.source.pushback(c);
                        return Ok(automaton);
                    }
                    Outcome::Invalid => {
                        let offset = self.source.offset;
                        return Err(if automaton.invalid_was_escape() {
                            LexError::InvalidEscape { offset }
                        } else {
                            LexError::NonPrintableInString {
                                found: c as u8,
                                offset,
                            }
                        });
                    }
                },
                None => {
                    return match automaton.on_eof() {
                        EofOutcome::Ok => Ok(automaton),
                        EofOutcome::Unterminated => Err(LexError::UnterminatedString { start }),
                    };
                }
            }
        }
    }

    /// Like [`Self::drive`], but for [`BraceCommentAutomaton`]: an
    /// unterminated brace comment is reported as
    /// [`LexError::UnterminatedComment`], not `UnterminatedString`.
    fn drive_comment(&mut self, start: usize) -> Result<BraceCommentAutomaton, LexError> {
        let mut automaton = BraceCommentAutomaton;
        loop {
            match self.source.next()? {
                Some(c) => match automaton.step(c) {
                    Outcome::Consumed => continue,
                    Outcome::TerminatedConsumed => return Ok(automaton),
                    Outcome::TerminatedNonconsumed => {
                        self.source.pushback(c);
                        return Ok(automaton);
                    }
                    Outcome::Invalid => {
                        return Err(LexError::NonPrintableInString {
                            found: c as u8,
                            offset: self.source.offset,
                        });
                    }
                },
                None => {
                    return match automaton.on_eof() {
                        EofOutcome::Ok => Ok(automaton),
                        EofOutcome::Unterminated => Err(LexError::UnterminatedComment { start }),
                    };
                }
            }
        }
    }

    fn next_atom(&mut self) -> Result<Option<Atom>, LexError> {
        self.skip_separators()?;
        let start = self.source.offset;
        let first = match self.source.next()? {
            Some(c) => c,
            None => return Ok(None),
        };

        let atom = match first {
            '[' => Atom::LBracket,
            ']' => Atom::RBracket,
            '(' => Atom::LParen,
            ')' => Atom::RParen,
            '.' => Atom::Period,
            '*' => Atom::Star,
            '"' => {
                let a = self.drive_string(start)?;
                Atom::Str(a.value)
            }
            '{' => {
                self.drive_comment(start)?;
                Atom::BraceComment
            }
            ';' => {
                self.drive(ToEndOfLineAutomaton, start)?;
                Atom::LineComment
            }
            '%' => {
                self.drive(ToEndOfLineAutomaton, start)?;
                Atom::EscapeLine
            }
            '$' => {
                self.drive(NumericGlyphAutomaton::default(), start)?;
                Atom::NumericAnnotation
            }
            c if c.is_ascii_alphanumeric() => {
                let a = self.drive(SymbolAutomaton::new(), start)?;
                if a.all_digits {
                    Atom::Integer(a.value)
                } else {
                    Atom::Symbol(a.value)
                }
            }
            c => {
                return Err(LexError::UnrecognizedChar {
                    found: c,
                    offset: start,
                });
            }
        };
        Ok(Some(atom))
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = Result<Atom, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_atom() {
            Ok(Some(atom)) => Some(Ok(atom)),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(input: &str) -> Vec<Atom> {
        Lexer::new(input.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .expect("lexing should succeed")
    }

    #[test]
    fn header_tokenizes() {
        let got = atoms(r#"[Event "F/S Return Match"]"#);
        assert_eq!(
            got,
            vec![
                Atom::LBracket,
                Atom::Symbol("Event".into()),
                Atom::Str("F/S Return Match".into()),
                Atom::RBracket,
            ]
        );
    }

    #[test]
    fn integer_reclassification() {
        let got = atoms("42 e4");
        assert_eq!(
            got,
            vec![Atom::Integer("42".into()), Atom::Symbol("e4".into())]
        );
    }

    #[test]
    fn string_escapes_quote() {
        let got = atoms(r#""a \"b\" c""#);
        assert_eq!(got, vec![Atom::Str(r#"a "b" c"#.into())]);
    }

    #[test]
    fn unterminated_string_errors() {
        let mut lex = Lexer::new(r#""abc"#.as_bytes());
        assert!(matches!(
            lex.next(),
            Some(Err(LexError::UnterminatedString { .. }))
        ));
    }

    #[test]
    fn escaped_non_printable_is_an_invalid_escape() {
        let mut lex = Lexer::new("\"a\\\x07b\"".as_bytes());
        assert!(matches!(
            lex.next(),
            Some(Err(LexError::InvalidEscape { .. }))
        ));
    }

    #[test]
    fn bare_non_printable_in_string_is_non_printable_error() {
        let mut lex = Lexer::new("\"a\x07b\"".as_bytes());
        assert!(matches!(
            lex.next(),
            Some(Err(LexError::NonPrintableInString { .. }))
        ));
    }

    #[test]
    fn comments_and_glyphs_are_dropped_atoms() {
        let got = atoms("{a comment} $3 ;line\ne4 %escape\nNf3");
        assert_eq!(
            got,
            vec![
                Atom::BraceComment,
                Atom::NumericAnnotation,
                Atom::LineComment,
                Atom::Symbol("e4".into()),
                Atom::EscapeLine,
                Atom::Symbol("Nf3".into()),
            ]
        );
    }

    #[test]
    fn unterminated_comment_errors() {
        let mut lex = Lexer::new(r#"{abc"#.as_bytes());
        assert!(matches!(
            lex.next(),
            Some(Err(LexError::UnterminatedComment { .. }))
        ));
    }

    #[test]
    fn unrecognized_character_errors() {
        let mut lex = Lexer::new("@".as_bytes());
        assert!(matches!(
            lex.next(),
            Some(Err(LexError::UnrecognizedChar { found: '@', .. }))
        ));
    }
}
