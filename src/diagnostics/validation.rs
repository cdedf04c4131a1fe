//! Static checks over a machine's configuration using Validation.
//!
//! Configuration mistakes that the builder cannot reject eagerly surface
//! here. All issues are accumulated rather than reported one at a time.

use crate::core::{Representations, State, Trigger};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A configuration problem found by [`validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationIssue {
    #[error("State '{state}' is its own ancestor in the superstate chain")]
    HierarchyCycle { state: String },

    #[error(
        "State '{state}' has {count} unguarded transitions for trigger '{trigger}'; \
         firing it will always fail"
    )]
    ConflictingUnguardedTransitions {
        state: String,
        trigger: String,
        count: usize,
    },
}

/// Check every representation, accumulating ALL issues.
///
/// Returns `Validation::Success(())` for a sound configuration.
pub fn validate<S: State, T: Trigger, P>(
    representations: &Representations<S, T, P>,
) -> Validation<(), NonEmptyVec<ConfigurationIssue>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ConfigurationIssue>>> = Vec::new();

    for rep in representations.iter() {
        checks.push(check_acyclic(rep.state(), representations));

        for trigger in rep.triggers() {
            let count = rep
                .transitions_for(trigger)
                .iter()
                .filter(|t| !t.has_guard())
                .count();
            let check = if count > 1 {
                Validation::fail(ConfigurationIssue::ConflictingUnguardedTransitions {
                    state: format!("{:?}", rep.state()),
                    trigger: format!("{trigger:?}"),
                    count,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_acyclic<S: State, T: Trigger, P>(
    state: &S,
    representations: &Representations<S, T, P>,
) -> Validation<(), NonEmptyVec<ConfigurationIssue>> {
    let mut next = representations.get(state).and_then(|rep| rep.superstate());

    // A chain that never returns to `state` within len() steps either ends
    // or loops elsewhere; only members of a cycle report it.
    for _ in 0..representations.len() {
        match next {
            None => break,
            Some(ancestor) if ancestor == state => {
                return Validation::fail(ConfigurationIssue::HierarchyCycle {
                    state: format!("{state:?}"),
                });
            }
            Some(ancestor) => {
                next = representations.get(ancestor).and_then(|rep| rep.superstate());
            }
        }
    }

    Validation::success(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, Transition};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        A,
        B,
        C,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestTrigger {
        X,
        Y,
    }

    type Reps = Representations<TestState, TestTrigger>;

    #[test]
    fn sound_configuration_passes() {
        let mut reps = Reps::new();
        reps.link(TestState::B, TestState::A);
        reps.get_or_insert(TestState::A).add_transition(Transition::new(
            TestState::A,
            TestState::C,
            Some(TestTrigger::X),
        ));
        reps.get_or_insert(TestState::A).add_transition(
            Transition::new(TestState::A, TestState::B, Some(TestTrigger::Y))
                .with_guard(Guard::always()),
        );
        reps.get_or_insert(TestState::A).add_transition(
            Transition::new(TestState::A, TestState::C, Some(TestTrigger::Y))
                .with_guard(Guard::never()),
        );

        assert!(validate(&reps).is_success());
    }

    #[test]
    fn validation_accumulates_all_issues() {
        let mut reps = Reps::new();
        reps.get_or_insert(TestState::A).set_superstate(TestState::B);
        reps.get_or_insert(TestState::B).set_superstate(TestState::A);
        let c = reps.get_or_insert(TestState::C);
        c.add_transition(Transition::new(TestState::C, TestState::A, Some(TestTrigger::X)));
        c.add_transition(Transition::new(TestState::C, TestState::B, Some(TestTrigger::X)));

        let result = validate(&reps);

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                let cycles = errors
                    .iter()
                    .filter(|e| matches!(e, ConfigurationIssue::HierarchyCycle { .. }))
                    .count();
                let has_conflict = errors.iter().any(|e| {
                    matches!(
                        e,
                        ConfigurationIssue::ConflictingUnguardedTransitions { count: 2, .. }
                    )
                });

                assert_eq!(cycles, 2);
                assert!(has_conflict);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn state_leading_into_cycle_is_not_reported() {
        let mut reps = Reps::new();
        reps.get_or_insert(TestState::A).set_superstate(TestState::B);
        reps.get_or_insert(TestState::B).set_superstate(TestState::A);
        reps.get_or_insert(TestState::C).set_superstate(TestState::A);

        if let Validation::Failure(errors) = validate(&reps) {
            assert_eq!(errors.len(), 2);
            assert!(!errors.iter().any(|e| {
                *e == ConfigurationIssue::HierarchyCycle {
                    state: "C".to_string(),
                }
            }));
        } else {
            panic!("Expected failures, got success");
        }
    }

    #[test]
    fn issue_messages_name_state_and_trigger() {
        let issue = ConfigurationIssue::ConflictingUnguardedTransitions {
            state: "C".to_string(),
            trigger: "X".to_string(),
            count: 2,
        };

        let message = issue.to_string();
        assert!(message.contains("'C'"));
        assert!(message.contains("'X'"));
    }
}
