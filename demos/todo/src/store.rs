//! Synchronous, caller-owned todo store.
//!
//! [`TodoStore`] runs [`TodoReducer`] in place with no runtime, locking, or
//! async. Hosts that need to share a store across tasks use
//! [`SharedTodoStore`](crate::SharedTodoStore) instead; both go through the
//! same reducer.

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use todo_store_core::{effect::Effect, reducer::Reducer};

/// An in-memory todo list
///
/// Every operation is total: it always succeeds, and unknown ids are no-ops.
///
/// # Example
///
/// ```
/// use todo::{TodoId, TodoStore};
///
/// let mut store = TodoStore::new();
/// let milk = store.add("buy milk");
/// let dog = store.add("walk dog");
///
/// store.toggle_completed(milk);
/// store.delete(dog);
///
/// assert_eq!(store.items().len(), 1);
/// assert!(store.items()[0].completed);
/// assert_eq!(store.next_id(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    state: TodoState,
    reducer: TodoReducer,
    environment: TodoEnvironment,
}

impl TodoStore {
    /// Creates an empty store whose first todo gets id 0
    #[must_use]
    pub const fn new() -> Self {
        Self::from_state(TodoState::new())
    }

    /// Creates a store around existing state
    #[must_use]
    pub const fn from_state(state: TodoState) -> Self {
        Self {
            state,
            reducer: TodoReducer::new(),
            environment: TodoEnvironment::new(),
        }
    }

    /// Appends a new, open todo and returns the id it was given
    pub fn add(&mut self, text: impl Into<String>) -> TodoId {
        let id = TodoId::new(self.state.next_id());
        self.dispatch(TodoAction::AddTodo { text: text.into() });
        id
    }

    /// Removes the todo with `id`, if there is one
    pub fn delete(&mut self, id: TodoId) {
        self.dispatch(TodoAction::DeleteTodo { id });
    }

    /// Flips the completion flag of the todo with `id`, if there is one
    pub fn toggle_completed(&mut self, id: TodoId) {
        self.dispatch(TodoAction::ToggleCompleted { id });
    }

    /// Runs an action through the reducer
    pub fn dispatch(&mut self, action: TodoAction) {
        let effects = self
            .reducer
            .reduce(&mut self.state, action, &self.environment);
        debug_assert!(
            effects.iter().all(Effect::is_noop),
            "todo reducer never produces effects"
        );
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        &self.state
    }

    /// All todos, in display order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        self.state.items()
    }

    /// The id the next added todo will receive
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.state.next_id()
    }

    /// Consumes the store, returning its state
    #[must_use]
    pub fn into_state(self) -> TodoState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_sequential_ids() {
        let mut store = TodoStore::new();

        let ids: Vec<TodoId> = ["a", "b", "c"].into_iter().map(|t| store.add(t)).collect();

        assert_eq!(ids, vec![TodoId::new(0), TodoId::new(1), TodoId::new(2)]);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn dispatch_matches_named_operations() {
        let mut by_method = TodoStore::new();
        let id = by_method.add("x");
        by_method.toggle_completed(id);

        let mut by_action = TodoStore::new();
        by_action.dispatch(TodoAction::AddTodo { text: "x".into() });
        by_action.dispatch(TodoAction::ToggleCompleted { id });

        assert_eq!(by_method.into_state(), by_action.into_state());
    }

    #[test]
    fn from_state_continues_counter() {
        let mut first = TodoStore::new();
        first.add("a");
        first.add("b");
        first.delete(TodoId::new(1));

        let mut second = TodoStore::from_state(first.into_state());
        assert_eq!(second.add("c"), TodoId::new(2));
    }
}
