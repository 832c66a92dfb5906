//! This module defines the `Automaton` struct, a deterministic finite automaton built from a
//! validated `Definition`. States live in an arena and transitions refer to their successors
//! by index, so lookups never need to re-check referential integrity.

use crate::analyzer::analyze;
use crate::types::{Definition, FaError};
use std::collections::{HashMap, HashSet};

/// A single state of an automaton and its outgoing transitions.
#[derive(Debug, Clone)]
struct State {
    name: String,
    transitions: HashMap<String, usize>,
    accepting: bool,
}

/// A deterministic finite automaton with a mutable current-state cursor.
///
/// The states, alphabet and transition table are fixed at construction. Only the
/// cursor moves, through [`Automaton::step`] and [`Automaton::reset`].
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    alphabet: HashSet<String>,
    start: usize,
    current: usize,
    verbose: bool,
}

impl Automaton {
    /// Creates a new `Automaton` from a `Definition`.
    ///
    /// The definition is analyzed in full before any state is created.
    ///
    /// # Arguments
    ///
    /// * `definition` - The states, alphabet, transitions, start and final states.
    /// * `verbose` - Whether a failed transition should be reported as a warning.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` with its cursor on the start state.
    /// * `Err(FaError::StateError)` or `Err(FaError::TransitionError)` if the definition is malformed.
    pub fn new(definition: &Definition, verbose: bool) -> Result<Self, FaError> {
        analyze(definition)?;

        let index: HashMap<&str, usize> = definition
            .states
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let states = definition
            .states
            .iter()
            .map(|name| State {
                name: name.clone(),
                transitions: definition
                    .transitions
                    .get(name)
                    .map(|table| {
                        table
                            .iter()
                            .map(|(symbol, next)| (symbol.clone(), index[next.as_str()]))
                            .collect()
                    })
                    .unwrap_or_default(),
                accepting: definition.finals.contains(name),
            })
            .collect();

        let start = index[definition.start.as_str()];
        tracing::debug!(
            start = %definition.start,
            states = definition.states.len(),
            transitions = definition.transition_count(),
            "built automaton"
        );

        Ok(Self {
            states,
            alphabet: definition.alphabet.iter().cloned().collect(),
            start,
            current: start,
            verbose,
        })
    }

    /// Follows the transition for `symbol` from the current state.
    ///
    /// # Returns
    ///
    /// * `true` if the transition exists; the cursor moves to its destination.
    /// * `false` if it does not; the cursor stays where it is.
    pub fn step(&mut self, symbol: &str) -> bool {
        let state = &self.states[self.current];

        match state.transitions.get(symbol) {
            Some(&next) => {
                self.current = next;
                true
            }
            None => {
                if self.verbose {
                    tracing::warn!(
                        state = %state.name,
                        symbol,
                        "state has no transition for symbol, transition could not be performed"
                    );
                }
                false
            }
        }
    }

    /// Returns true if the current state is an accepting state.
    pub fn is_accepting(&self) -> bool {
        self.states[self.current].accepting
    }

    /// Moves the cursor back to the start state.
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Returns the name of the current state.
    pub fn state(&self) -> &str {
        &self.states[self.current].name
    }

    /// Returns the name of the start state.
    pub fn start_state(&self) -> &str {
        &self.states[self.start].name
    }

    /// Returns true if `name` is a declared accepting state.
    pub fn is_final(&self, name: &str) -> bool {
        self.states
            .iter()
            .any(|state| state.accepting && state.name == name)
    }

    /// Returns true if `symbol` belongs to the input alphabet.
    pub fn accepts_symbol(&self, symbol: &str) -> bool {
        self.alphabet.contains(symbol)
    }

    /// Returns the number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    // Returns everything logged at WARN while performing one missed step
    fn warnings_for_missed_step(verbose: bool) -> String {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut automaton = Automaton::new(&create_ends_with_b(), verbose).unwrap();
            assert!(!automaton.step("x"));
            assert_eq!(automaton.state(), "q0");
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    // Accepts strings over {a, b} that end in `b`
    fn create_ends_with_b() -> Definition {
        Definition::new(&["q0", "q1"], &["a", "b"], "q0", &["q1"])
            .with_transition("q0", "a", "q0")
            .with_transition("q0", "b", "q1")
            .with_transition("q1", "a", "q0")
            .with_transition("q1", "b", "q1")
    }

    #[test]
    fn test_automaton_creation() {
        let automaton = Automaton::new(&create_ends_with_b(), false).unwrap();

        assert_eq!(automaton.state(), "q0");
        assert_eq!(automaton.start_state(), "q0");
        assert_eq!(automaton.state_count(), 2);
        assert!(!automaton.is_accepting());
        assert!(automaton.is_final("q1"));
        assert!(!automaton.is_final("q0"));
        assert!(automaton.accepts_symbol("a"));
        assert!(!automaton.accepts_symbol("c"));
        assert!(!automaton.is_verbose());
    }

    #[test]
    fn test_step_follows_transitions() {
        let mut automaton = Automaton::new(&create_ends_with_b(), false).unwrap();

        assert!(automaton.step("a"));
        assert_eq!(automaton.state(), "q0");
        assert!(automaton.step("b"));
        assert_eq!(automaton.state(), "q1");
        assert!(automaton.is_accepting());
    }

    #[test]
    fn test_failed_step_keeps_state() {
        let mut automaton = Automaton::new(&create_ends_with_b(), true).unwrap();

        assert!(automaton.step("b"));
        assert!(!automaton.step("c"));
        assert_eq!(automaton.state(), "q1");
        assert!(automaton.is_accepting());
    }

    #[test]
    fn test_verbose_missed_step_is_logged() {
        let output = warnings_for_missed_step(true);

        assert!(output.contains("WARN"), "unexpected output: {}", output);
        assert!(output.contains("state=q0"), "unexpected output: {}", output);
        assert!(output.contains("symbol=\"x\""), "unexpected output: {}", output);
    }

    #[test]
    fn test_quiet_missed_step_is_not_logged() {
        assert_eq!(warnings_for_missed_step(false), "");
    }

    #[test]
    fn test_state_without_transitions() {
        let definition =
            Definition::new(&["q0", "dead"], &["a"], "q0", &[]).with_transition("q0", "a", "dead");
        let mut automaton = Automaton::new(&definition, false).unwrap();

        assert!(automaton.step("a"));
        assert!(!automaton.step("a"));
        assert_eq!(automaton.state(), "dead");
    }

    #[test]
    fn test_reset() {
        let mut automaton = Automaton::new(&create_ends_with_b(), false).unwrap();

        automaton.step("b");
        automaton.reset();
        assert_eq!(automaton.state(), "q0");
        assert!(!automaton.is_accepting());

        automaton.reset();
        assert_eq!(automaton.state(), "q0");
    }

    #[test]
    fn test_accepting_start_state() {
        let definition = Definition::new(&["q0"], &["a"], "q0", &["q0"]);
        let mut automaton = Automaton::new(&definition, false).unwrap();

        assert!(automaton.is_accepting());
        automaton.reset();
        assert!(automaton.is_accepting());
    }

    #[test]
    fn test_malformed_definitions() {
        let mut definition = create_ends_with_b();
        definition.start = "q9".to_string();
        assert!(matches!(
            Automaton::new(&definition, false),
            Err(FaError::StateError(_))
        ));

        let mut definition = create_ends_with_b();
        definition.finals = vec!["q9".to_string()];
        assert!(matches!(
            Automaton::new(&definition, false),
            Err(FaError::StateError(_))
        ));

        let mut definition = create_ends_with_b();
        definition.states.push("q0".to_string());
        assert!(matches!(
            Automaton::new(&definition, false),
            Err(FaError::StateError(_))
        ));

        let definition = create_ends_with_b().with_transition("q0", "c", "q1");
        assert!(matches!(
            Automaton::new(&definition, false),
            Err(FaError::TransitionError(_))
        ));

        let definition = create_ends_with_b().with_transition("q0", "a", "q9");
        assert!(matches!(
            Automaton::new(&definition, false),
            Err(FaError::TransitionError(_))
        ));
    }
}
