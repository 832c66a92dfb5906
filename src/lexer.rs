//! This module tokenizes raw Turing Machine traces.
//!
//! Every character is classified, then fed to a fresh lexer automaton starting in `START`.
//! Letters and digits lead to the `SYMBOL` state and are accumulated into a single token;
//! any other state flushes the pending symbol and emits the character on its own.

use crate::automaton::Automaton;
use crate::types::{Definition, FaError, Token, TokenKind, BLANK_SYMBOL, LEFT_ENDMARKER};
use std::borrow::Cow;
use std::fmt;

/// The name of the lexer's start state.
pub const START_STATE: &str = "START";

const DIGIT: &str = "digit";
const CHARACTER: &str = "character";

lazy_static::lazy_static! {
    /// The tokenizing automaton: one state per token category plus `START`.
    pub static ref LEXER_DEFINITION: Definition = {
        let blank = BLANK_SYMBOL.to_string();
        let lem = LEFT_ENDMARKER.to_string();

        let finals: Vec<&str> = TokenKind::ALL.iter().map(TokenKind::name).collect();
        let mut states = vec![START_STATE];
        states.extend(&finals);

        Definition::new(
            &states,
            &[" ", "<", ">", "-", "+", blank.as_str(), lem.as_str(), CHARACTER, DIGIT],
            START_STATE,
            &finals,
        )
        .with_transition(START_STATE, " ", "SPACE")
        .with_transition(START_STATE, "<", "MLEFT")
        .with_transition(START_STATE, ">", "MRIGHT")
        .with_transition(START_STATE, "-", "READ")
        .with_transition(START_STATE, "+", "WRITE")
        .with_transition(START_STATE, &blank, "BLANK")
        .with_transition(START_STATE, &lem, "LEM")
        .with_transition(START_STATE, CHARACTER, "SYMBOL")
        .with_transition(START_STATE, DIGIT, "SYMBOL")
        .with_transition("SYMBOL", CHARACTER, "SYMBOL")
        .with_transition("SYMBOL", DIGIT, "SYMBOL")
    };
}

/// The class of a single trace character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// An ASCII decimal digit.
    Digit,
    /// An ASCII letter, either case.
    Letter,
    /// Any other character, standing for itself.
    Literal(char),
}

impl CharClass {
    /// Returns the lexer alphabet symbol for this class.
    pub fn symbol(&self) -> Cow<'static, str> {
        match self {
            CharClass::Digit => Cow::Borrowed(DIGIT),
            CharClass::Letter => Cow::Borrowed(CHARACTER),
            CharClass::Literal(c) => Cow::Owned(c.to_string()),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

/// Classifies a trace character.
pub fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_ascii_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Literal(c)
    }
}

/// Splits traces into tokens using the lexer automaton.
#[derive(Debug, Clone)]
pub struct Lexer {
    automaton: Automaton,
}

impl Lexer {
    /// Creates a lexer with its own copy of the tokenizing automaton.
    pub fn new(verbose: bool) -> Result<Self, FaError> {
        Ok(Self {
            automaton: Automaton::new(&LEXER_DEFINITION, verbose)?,
        })
    }

    /// Tokenizes a single trace.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Token>)` with consecutive letters and digits merged into `SYMBOL` tokens.
    /// * `Err(FaError::NoTransition)` if a character cannot be consumed from `START`.
    pub fn lex(&mut self, trace: &str) -> Result<Vec<Token>, FaError> {
        let mut tokens = Vec::new();
        let mut symbol = String::new();

        for c in trace.chars() {
            self.automaton.reset();

            if !self.automaton.step(&classify(c).symbol()) {
                return Err(FaError::NoTransition {
                    state: self.automaton.state().to_string(),
                    character: c,
                });
            }

            let kind: TokenKind = self.automaton.state().parse()?;
            if kind == TokenKind::Symbol {
                symbol.push(c);
                continue;
            }

            if !symbol.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut symbol), TokenKind::Symbol));
            }
            tokens.push(Token::new(c, kind));
        }

        if !symbol.is_empty() {
            tokens.push(Token::new(symbol, TokenKind::Symbol));
        }

        self.automaton.reset();
        tracing::debug!(trace, count = tokens.len(), "lexed trace");

        Ok(tokens)
    }

    /// Returns the underlying automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}
