//! This module runs traces through the lexer and the verifier, one trace at a time.

use crate::lexer::Lexer;
use crate::types::{FaError, Token};
use crate::verifier::{Verdict, Verifier};
use serde::Serialize;

/// The result of processing a single trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub trace: String,
    pub tokens: Vec<Token>,
    pub verdict: Verdict,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Owns one lexer and one verifier. A pipeline is not meant to be shared; each thread
/// processing traces should create its own.
#[derive(Debug, Clone)]
pub struct Pipeline {
    lexer: Lexer,
    verifier: Verifier,
}

impl Pipeline {
    /// Creates a pipeline whose automata report failed transitions when `verbose` is set.
    pub fn new(verbose: bool) -> Result<Self, FaError> {
        Ok(Self {
            lexer: Lexer::new(verbose)?,
            verifier: Verifier::new(verbose)?,
        })
    }

    /// Tokenizes a trace without verifying it.
    pub fn lex(&mut self, trace: &str) -> Result<Vec<Token>, FaError> {
        self.lexer.lex(trace)
    }

    /// Tokenizes and verifies a trace.
    pub fn process(&mut self, trace: &str) -> Result<Report, FaError> {
        let tokens = self.lexer.lex(trace)?;
        let verdict = self.verifier.check(&tokens);

        Ok(Report {
            trace: trace.to_string(),
            tokens,
            verdict,
        })
    }

    /// Processes every trace. A trace that fails to lex does not stop the others.
    pub fn run<I, S>(&mut self, traces: I) -> Vec<Result<Report, FaError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        traces
            .into_iter()
            .map(|trace| self.process(trace.as_ref()))
            .collect()
    }
}
