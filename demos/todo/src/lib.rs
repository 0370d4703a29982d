//! An in-memory todo list built on the reducer pattern.
//!
//! The list is an ordered sequence of todos and an id counter. Three
//! operations change it, and none of them can fail:
//!
//! - **add**: append a new open todo with the next id
//! - **delete**: remove the todo with a given id (unknown ids are ignored)
//! - **toggle completed**: flip a todo between open and completed (unknown ids are ignored)
//!
//! [`TodoReducer`] holds the logic. Use it through [`TodoStore`] when a single
//! owner drives the list synchronously, or through [`SharedTodoStore`] when
//! several tasks share it.
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{shared_store, TodoAction, TodoId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = shared_store();
//!
//! store.send(TodoAction::AddTodo { text: "buy milk".to_string() }).await?;
//! store.send(TodoAction::ToggleCompleted { id: TodoId::new(0) }).await?;
//!
//! let completed = store.state(|s| s.completed_count()).await;
//! println!("Completed: {completed}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use types::{TodoAction, TodoId, TodoItem, TodoState};

use todo_store_runtime::{Store, StoreConfig};

/// A todo list behind the async runtime `Store`
pub type SharedTodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Creates an empty shared todo store with default configuration
#[must_use]
pub fn shared_store() -> SharedTodoStore {
    shared_store_with_config(StoreConfig::default())
}

/// Creates an empty shared todo store with the given configuration
#[must_use]
pub fn shared_store_with_config(config: StoreConfig) -> SharedTodoStore {
    Store::with_config(
        TodoState::new(),
        TodoReducer::new(),
        TodoEnvironment::new(),
        config,
    )
}
