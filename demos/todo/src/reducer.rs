//! Reducer logic for the todo list.
//!
//! Every action is total: there is nothing to validate, and unknown ids are
//! silently ignored. The reducer never produces effects.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use todo_store_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Environment dependencies for the todo reducer
///
/// The todo list needs nothing from the outside world; the type exists so the
/// reducer plugs into the generic `Store`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoEnvironment;

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add(state: &mut TodoState, text: String) {
        let id = TodoId::new(state.next_id);
        state.items.push(TodoItem::new(id, text));
        state.next_id += 1;
        tracing::trace!(%id, "Added todo");
    }

    fn delete(state: &mut TodoState, id: TodoId) {
        let before = state.items.len();
        state.items.retain(|todo| todo.id != id);

        if state.items.len() == before {
            tracing::trace!(%id, "Delete ignored: no such todo");
        } else {
            tracing::trace!(%id, "Deleted todo");
        }
    }

    fn toggle_completed(state: &mut TodoState, id: TodoId) {
        match state.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.toggle();
                tracing::trace!(%id, completed = todo.completed, "Toggled todo");
            },
            None => tracing::trace!(%id, "Toggle ignored: no such todo"),
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::AddTodo { text } => Self::add(state, text),
            TodoAction::DeleteTodo { id } => Self::delete(state, id),
            TodoAction::ToggleCompleted { id } => Self::toggle_completed(state, id),
        }

        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use todo_store_testing::{assertions, ReducerTest};

    fn add(text: &str) -> TodoAction {
        TodoAction::AddTodo {
            text: text.to_string(),
        }
    }

    fn state_with(texts: &[&str]) -> TodoState {
        let mut state = TodoState::new();
        for text in texts {
            TodoReducer::add(&mut state, (*text).to_string());
        }
        state
    }

    #[test]
    fn test_add_todo() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoState::new())
            .when_action(add("buy milk"))
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.next_id(), 1);
                let todo = state.get(TodoId::new(0)).unwrap();
                assert_eq!(todo.text, "buy milk");
                assert!(!todo.completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_accepts_empty_and_duplicate_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoState::new())
            .when_actions([add(""), add("same"), add("same")])
            .then_state(|state| {
                let ids: Vec<u64> = state.items().iter().map(|t| t.id.value()).collect();
                assert_eq!(ids, vec![0, 1, 2]);
                assert_eq!(state.items()[0].text, "");
                assert_eq!(state.items()[1].text, state.items()[2].text);
            })
            .run();
    }

    #[test]
    fn test_delete_preserves_order_and_counter() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(state_with(&["a", "b", "c"]))
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(1) })
            .then_state(|state| {
                let texts: Vec<&str> = state.items().iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, vec!["a", "c"]);
                assert_eq!(state.next_id(), 3);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(state_with(&["a", "b"]))
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(1) })
            .when_action(add("c"))
            .then_state(|state| {
                assert!(!state.exists(TodoId::new(1)));
                assert_eq!(state.items()[1].id, TodoId::new(2));
            })
            .run();
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let before = state_with(&["a", "b"]);
        let expected = before.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(before)
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(99) })
            .then_state(move |state| assert_eq!(*state, expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_completed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(state_with(&["a", "b"]))
            .when_action(TodoAction::ToggleCompleted { id: TodoId::new(1) })
            .then_state(|state| {
                assert!(!state.get(TodoId::new(0)).unwrap().completed);
                assert!(state.get(TodoId::new(1)).unwrap().completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let before = state_with(&["a"]);
        let expected = before.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(before)
            .when_actions([
                TodoAction::ToggleCompleted { id: TodoId::new(0) },
                TodoAction::ToggleCompleted { id: TodoId::new(0) },
            ])
            .then_state(move |state| assert_eq!(*state, expected))
            .run();
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let before = state_with(&["a"]);
        let expected = before.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(before)
            .when_action(TodoAction::ToggleCompleted { id: TodoId::new(5) })
            .then_state(move |state| assert_eq!(*state, expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_buy_milk_walk_dog_scenario() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new())
            .given_state(TodoState::new())
            .when_actions([
                add("buy milk"),
                add("walk dog"),
                TodoAction::ToggleCompleted { id: TodoId::new(0) },
                TodoAction::DeleteTodo { id: TodoId::new(1) },
            ])
            .then_state(|state| {
                assert_eq!(
                    state.items(),
                    &[TodoItem {
                        id: TodoId::new(0),
                        text: "buy milk".to_string(),
                        completed: true,
                    }]
                );
                assert_eq!(state.next_id(), 2);
            })
            .run();
    }
}
