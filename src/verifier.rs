//! This module checks lexed traces against the step grammar.
//!
//! A valid trace is a non-empty sequence of steps, each made of exactly five tokens:
//! `READ`, an operand, `WRITE`, an operand, and a head move. `SPACE` tokens are ignored.

use crate::automaton::Automaton;
use crate::types::{Definition, FaError, Token, TokenKind, STEP_LENGTH};
use serde::Serialize;

/// The name of the verifier's start state.
pub const START_STATE: &str = "Start";

lazy_static::lazy_static! {
    /// The step automaton. `s5` is reached after every head move and is the only accepting state.
    pub static ref VERIFIER_DEFINITION: Definition = Definition::new(
        &[START_STATE, "s1", "s2", "s3", "s4", "s5"],
        &["MLEFT", "MRIGHT", "READ", "WRITE", "BLANK", "LEM", "SYMBOL"],
        START_STATE,
        &["s5"],
    )
    .with_transition(START_STATE, "READ", "s1")
    .with_transition("s1", "SYMBOL", "s2")
    .with_transition("s1", "LEM", "s2")
    .with_transition("s1", "BLANK", "s2")
    .with_transition("s2", "WRITE", "s3")
    .with_transition("s3", "SYMBOL", "s4")
    .with_transition("s3", "LEM", "s4")
    .with_transition("s3", "BLANK", "s4")
    .with_transition("s4", "MLEFT", "s5")
    .with_transition("s4", "MRIGHT", "s5")
    .with_transition("s5", "READ", "s1");
}

/// The detailed outcome of verifying a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    /// The stream is a whole number of valid steps.
    Accepted { steps: usize },
    /// The token at `position` cannot follow the tokens before it.
    Rejected {
        position: usize,
        kind: TokenKind,
        state: String,
    },
    /// The stream ended in the middle of a step.
    Incomplete { state: String, consumed: usize },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Verifies token streams using the step automaton.
#[derive(Debug, Clone)]
pub struct Verifier {
    automaton: Automaton,
}

impl Verifier {
    /// Creates a verifier with its own copy of the step automaton.
    pub fn new(verbose: bool) -> Result<Self, FaError> {
        Ok(Self {
            automaton: Automaton::new(&VERIFIER_DEFINITION, verbose)?,
        })
    }

    /// Returns true if `tokens` form a complete sequence of valid steps.
    pub fn verify(&mut self, tokens: &[Token]) -> bool {
        self.check(tokens).is_accepted()
    }

    /// Steps through `tokens`, skipping `SPACE`, and stops at the first token the
    /// automaton cannot consume.
    pub fn check(&mut self, tokens: &[Token]) -> Verdict {
        self.automaton.reset();

        let mut consumed = 0;
        for (position, token) in tokens.iter().enumerate() {
            if token.kind == TokenKind::Space {
                continue;
            }

            if !self.automaton.step(token.kind.name()) {
                let verdict = Verdict::Rejected {
                    position,
                    kind: token.kind,
                    state: self.automaton.state().to_string(),
                };
                tracing::debug!(?verdict, "trace rejected");
                return verdict;
            }

            consumed += 1;
        }

        let verdict = if self.automaton.is_accepting() && consumed % STEP_LENGTH == 0 {
            Verdict::Accepted {
                steps: consumed / STEP_LENGTH,
            }
        } else {
            Verdict::Incomplete {
                state: self.automaton.state().to_string(),
                consumed,
            }
        };
        tracing::debug!(?verdict, "trace verified");

        verdict
    }

    /// Returns the underlying automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}
