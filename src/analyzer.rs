//! This module validates automaton definitions before any automaton is built from them.
//! It checks that state names are unique and that the start state, the final states and
//! every transition only reference declared states and symbols.

use crate::types::{Definition, FaError};
use std::collections::HashSet;

/// Represents the problems that can be found in an automaton definition.
///
/// Variants that point at an undeclared state carry the declared state set, so the
/// resulting message can list it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The state set contains the same name more than once.
    DuplicateStates(Vec<String>),
    /// The start state is not part of the state set.
    InvalidStartState { state: String, states: Vec<String> },
    /// A final state is not part of the state set.
    InvalidFinalState { state: String, states: Vec<String> },
    /// The transition table has an entry for an undeclared source state.
    UndefinedSourceState { state: String, states: Vec<String> },
    /// A transition uses a symbol outside the alphabet.
    UndefinedSymbol { state: String, symbol: String },
    /// A transition leads to an undeclared state.
    UndefinedNextState {
        state: String,
        symbol: String,
        next_state: String,
        states: Vec<String>,
    },
}

impl From<AnalysisError> for FaError {
    /// Converts an `AnalysisError` into a `FaError::StateError` or `FaError::TransitionError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::DuplicateStates(duplicates) => {
                FaError::StateError(format!("Q contains duplicates: {:?}", duplicates))
            }
            AnalysisError::InvalidStartState { state, states } => {
                FaError::StateError(format!("Starting state '{}' not in Q: {:?}", state, states))
            }
            AnalysisError::InvalidFinalState { state, states } => {
                FaError::StateError(format!("Final state '{}' not in Q: {:?}", state, states))
            }
            AnalysisError::UndefinedSourceState { state, states } => {
                FaError::TransitionError(format!("State '{}' not in Q: {:?}", state, states))
            }
            AnalysisError::UndefinedSymbol { state, symbol } => FaError::TransitionError(format!(
                "Symbol '{}' for state '{}' not in Sigma",
                symbol, state
            )),
            AnalysisError::UndefinedNextState {
                state,
                symbol,
                next_state,
                states,
            } => FaError::TransitionError(format!(
                "State '{}' for symbol '{}' and state '{}' not in Q: {:?}",
                next_state, symbol, state, states
            )),
        }
    }
}

/// Analyzes an automaton `Definition` for referential integrity.
///
/// Checks run in a fixed order: duplicate states, start state, final states,
/// transitions. The first failing check determines the returned error.
///
/// # Returns
///
/// * `Ok(())` if the definition is well-formed.
/// * `Err(FaError::StateError)` if the state set, start state or final states are inconsistent.
/// * `Err(FaError::TransitionError)` if a transition references an unknown state or symbol.
pub fn analyze(definition: &Definition) -> Result<(), FaError> {
    let first_error = [
        check_duplicate_states,
        check_start_state,
        check_final_states,
        check_transitions,
    ]
    .iter()
    .find_map(|f| f(definition).err());

    match first_error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Checks that no state name is declared twice.
fn check_duplicate_states(definition: &Definition) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = definition
        .states
        .iter()
        .filter(|state| !seen.insert(state.as_str()))
        .cloned()
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        return Err(AnalysisError::DuplicateStates(duplicates));
    }

    Ok(())
}

/// Checks that the start state is declared.
fn check_start_state(definition: &Definition) -> Result<(), AnalysisError> {
    if !definition.states.contains(&definition.start) {
        return Err(AnalysisError::InvalidStartState {
            state: definition.start.clone(),
            states: definition.states.clone(),
        });
    }

    Ok(())
}

/// Checks that every final state is declared.
fn check_final_states(definition: &Definition) -> Result<(), AnalysisError> {
    definition
        .finals
        .iter()
        .find(|state| !definition.states.contains(state))
        .map_or(Ok(()), |state| {
            Err(AnalysisError::InvalidFinalState {
                state: state.clone(),
                states: definition.states.clone(),
            })
        })
}

/// Checks that every transition starts in a declared state, consumes a symbol of the
/// alphabet and leads to a declared state.
fn check_transitions(definition: &Definition) -> Result<(), AnalysisError> {
    let states: HashSet<&str> = definition.states.iter().map(String::as_str).collect();
    let alphabet: HashSet<&str> = definition.alphabet.iter().map(String::as_str).collect();

    for (state, table) in &definition.transitions {
        if !states.contains(state.as_str()) {
            return Err(AnalysisError::UndefinedSourceState {
                state: state.clone(),
                states: definition.states.clone(),
            });
        }

        for (symbol, next_state) in table {
            if !alphabet.contains(symbol.as_str()) {
                return Err(AnalysisError::UndefinedSymbol {
                    state: state.clone(),
                    symbol: symbol.clone(),
                });
            }

            if !states.contains(next_state.as_str()) {
                return Err(AnalysisError::UndefinedNextState {
                    state: state.clone(),
                    symbol: symbol.clone(),
                    next_state: next_state.clone(),
                    states: definition.states.clone(),
                });
            }
        }
    }

    Ok(())
}
