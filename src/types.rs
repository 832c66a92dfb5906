//! This module defines the core data structures and types used throughout the trace checker,
//! including automaton definitions, lexer tokens, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The glyph a trace uses for the left endmarker of the tape.
pub const LEFT_ENDMARKER: char = '⊢';
/// The glyph a trace uses for a blank tape cell.
pub const BLANK_SYMBOL: char = '⊔';
/// The number of non-space tokens making up a single execution step.
pub const STEP_LENGTH: usize = 5;

/// A declarative description of a deterministic finite automaton.
///
/// A definition is plain data and may be malformed. It only becomes an
/// [`Automaton`](crate::automaton::Automaton) after passing [`analyze`](crate::analyzer::analyze).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    /// The state names, in declaration order.
    pub states: Vec<String>,
    /// The input alphabet.
    pub alphabet: Vec<String>,
    /// The transition table: source state -> (symbol -> destination state).
    pub transitions: BTreeMap<String, BTreeMap<String, String>>,
    /// The start state.
    pub start: String,
    /// The accepting states.
    pub finals: Vec<String>,
}

impl Definition {
    /// Creates a definition without any transitions.
    pub fn new(states: &[&str], alphabet: &[&str], start: &str, finals: &[&str]) -> Self {
        Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            alphabet: alphabet.iter().map(|s| s.to_string()).collect(),
            transitions: BTreeMap::new(),
            start: start.to_string(),
            finals: finals.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Adds the transition `from --symbol--> to`, replacing any previous
    /// transition for the same source state and symbol.
    pub fn with_transition(mut self, from: &str, symbol: &str, to: &str) -> Self {
        self.transitions
            .entry(from.to_string())
            .or_default()
            .insert(symbol.to_string(), to.to_string());
        self
    }

    /// Returns the total number of transitions in the table.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }
}

/// The category of a lexed token. Each category is named after the lexer state
/// that recognizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A single space separating actions.
    #[serde(rename = "SPACE")]
    Space,
    /// `<`, the head moves left.
    #[serde(rename = "MLEFT")]
    MoveLeft,
    /// `>`, the head moves right.
    #[serde(rename = "MRIGHT")]
    MoveRight,
    /// `-`, the machine reads a symbol.
    #[serde(rename = "READ")]
    Read,
    /// `+`, the machine writes a symbol.
    #[serde(rename = "WRITE")]
    Write,
    /// The blank glyph.
    #[serde(rename = "BLANK")]
    Blank,
    /// The left endmarker glyph.
    #[serde(rename = "LEM")]
    LeftEndmarker,
    /// A run of letters and digits.
    #[serde(rename = "SYMBOL")]
    Symbol,
}

impl TokenKind {
    /// Every token category.
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Space,
        TokenKind::MoveLeft,
        TokenKind::MoveRight,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::Blank,
        TokenKind::LeftEndmarker,
        TokenKind::Symbol,
    ];

    /// Returns the category name, which is also the name of the lexer state
    /// and of the verifier input symbol.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Space => "SPACE",
            TokenKind::MoveLeft => "MLEFT",
            TokenKind::MoveRight => "MRIGHT",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::Blank => "BLANK",
            TokenKind::LeftEndmarker => "LEM",
            TokenKind::Symbol => "SYMBOL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenKind {
    type Err = FaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| FaError::UnknownCategory(s.to_string()))
    }
}

/// A lexed token: the characters consumed and the category they were recognized as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.lexeme, self.kind)
    }
}

/// Represents the errors that can occur while building automata or processing traces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaError {
    /// The state set of a definition is inconsistent.
    #[error("State error: {0}")]
    StateError(String),
    /// A transition references an unknown state or symbol.
    #[error("Transition error: {0}")]
    TransitionError(String),
    /// The lexer could not consume a character of the trace.
    #[error("State '{state}' has no transition for token '{character}'")]
    NoTransition { state: String, character: char },
    /// The lexer reached a state that does not name a token category.
    #[error("State '{0}' is not a token category")]
    UnknownCategory(String),
    /// Indicates an error related to reading trace files.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_serialization() {
        let json = serde_json::to_string(&TokenKind::MoveLeft).unwrap();
        assert_eq!(json, "\"MLEFT\"");

        let kind: TokenKind = serde_json::from_str("\"LEM\"").unwrap();
        assert_eq!(kind, TokenKind::LeftEndmarker);
    }

    #[test]
    fn test_token_kind_names_match_serde() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            assert_eq!(kind.name().parse::<TokenKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_token_kind() {
        let result = "START".parse::<TokenKind>();
        assert_eq!(result, Err(FaError::UnknownCategory("START".to_string())));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("ab12", TokenKind::Symbol);
        assert_eq!(token.to_string(), "(\"ab12\", SYMBOL)");
    }

    #[test]
    fn test_definition_builder() {
        let definition = Definition::new(&["a", "b"], &["x"], "a", &["b"])
            .with_transition("a", "x", "b")
            .with_transition("b", "x", "b");

        assert_eq!(definition.transition_count(), 2);
        assert_eq!(definition.transitions["a"]["x"], "b");
    }

    #[test]
    fn test_error_display() {
        let error = FaError::NoTransition {
            state: "START".to_string(),
            character: '#',
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("START"));
        assert!(error_msg.contains('#'));
    }
}
