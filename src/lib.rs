//! This crate validates logged Turing Machine execution traces.
//! It includes a small deterministic finite automaton engine, a lexer that tokenizes a raw
//! trace character by character, and a verifier that checks the token stream against the
//! five-token step grammar.

pub mod analyzer;
pub mod automaton;
pub mod lexer;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod verifier;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `Automaton` struct from the automaton module.
pub use automaton::Automaton;
/// Re-exports the character classifier and `Lexer` from the lexer module.
pub use lexer::{classify, CharClass, Lexer};
/// Re-exports the `TraceLoader` struct from the loader module.
pub use loader::TraceLoader;
/// Re-exports the `Pipeline` and its per-trace `Report`.
pub use pipeline::{Pipeline, Report};
/// Re-exports shared types and constants from the types module.
pub use types::{
    Definition, FaError, Token, TokenKind, BLANK_SYMBOL, LEFT_ENDMARKER, STEP_LENGTH,
};
/// Re-exports the `Verifier` and its detailed `Verdict`.
pub use verifier::{Verdict, Verifier};
