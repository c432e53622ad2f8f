//! Mapping compiler-generated code back to the method it was written in.
//!
//! `async` methods and iterators compile into a state machine type whose `MoveNext` holds the
//! user's code, while the method the user wrote only constructs and starts the machine. A
//! usage found inside `MoveNext` is reported at the kickoff method instead.

use std::collections::HashSet;

use crate::metadata::{method::MethodRc, workspace::Workspace};

/// Resolves the original location of a method that may have been generated by the compiler.
pub trait OriginalLocation: Send + Sync {
    /// Returns the method whose source produced `method`, or `method` itself
    fn original_method(&self, workspace: &Workspace, method: &MethodRc) -> MethodRc;
}

/// Follows state machine kickoff references, transitively.
///
/// A lambda inside an async method produces a state machine whose kickoff is itself
/// generated, so the chain is followed until a method without kickoff reference is reached.
/// Cycles and unresolvable kickoff references end the walk at the last resolved method.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateMachineLocator;

impl OriginalLocation for StateMachineLocator {
    fn original_method(&self, workspace: &Workspace, method: &MethodRc) -> MethodRc {
        let mut current = method.clone();
        let mut seen = HashSet::new();
        seen.insert(current.id);

        while let Some(kickoff) = &current.state_machine_kickoff {
            let Some(next) = workspace.resolve_method(kickoff) else {
                log::warn!(
                    "state machine kickoff {} of {} does not resolve",
                    kickoff,
                    current.id
                );
                break;
            };
            if !seen.insert(next.id) {
                log::warn!("state machine kickoff cycle through {}", next.id);
                break;
            }
            current = next;
        }

        current
    }
}

/// Reports every method at its own location
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocator;

impl OriginalLocation for IdentityLocator {
    fn original_method(&self, _workspace: &Workspace, method: &MethodRc) -> MethodRc {
        method.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::factories::async_workspace;

    #[test]
    fn test_move_next_maps_to_kickoff() {
        let workspace = async_workspace();
        let move_next = workspace
            .find_method("App", "App.Worker/<LoadAsync>d__1", "MoveNext")
            .unwrap();
        let original = StateMachineLocator.original_method(&workspace, &move_next);
        assert_eq!(original.name, "LoadAsync");
    }

    #[test]
    fn test_nested_state_machines_are_followed() {
        let workspace = async_workspace();
        let inner = workspace
            .find_method("App", "App.Worker/<<LoadAsync>b__0>d", "MoveNext")
            .unwrap();
        let original = StateMachineLocator.original_method(&workspace, &inner);
        assert_eq!(original.name, "LoadAsync");
    }

    #[test]
    fn test_plain_method_is_its_own_origin() {
        let workspace = async_workspace();
        let plain = workspace.find_method("App", "App.Worker", "Sync").unwrap();
        assert_eq!(
            StateMachineLocator.original_method(&workspace, &plain).id,
            plain.id
        );
        let move_next = workspace
            .find_method("App", "App.Worker/<LoadAsync>d__1", "MoveNext")
            .unwrap();
        assert_eq!(
            IdentityLocator.original_method(&workspace, &move_next).id,
            move_next.id
        );
    }

    #[test]
    fn test_kickoff_cycle_terminates() {
        let workspace = async_workspace();
        let looped = workspace
            .find_method("App", "App.Broken/<Loop>d__0", "MoveNext")
            .unwrap();
        // Terminates on the cycle and returns a method of the cycle
        let original = StateMachineLocator.original_method(&workspace, &looped);
        assert!(original.state_machine_kickoff.is_some());
    }
}
