//! Integration tests for the todo list with the runtime Store
//!
//! These drive the todo reducer through the shared, async `Store` the same
//! way a presentation layer would.

#![allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic

use std::collections::HashSet;
use std::time::Duration;
use todo::{shared_store, TodoAction, TodoId, TodoItem};
use todo_store_runtime::StoreError;

fn add(text: &str) -> TodoAction {
    TodoAction::AddTodo {
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_scenario_with_store() {
    todo_store_testing::init_test_tracing();
    let store = shared_store();

    store.send(add("buy milk")).await.unwrap();
    let items = store.state(|s| s.items().to_vec()).await;
    assert_eq!(
        items,
        vec![TodoItem::new(TodoId::new(0), "buy milk".to_string())]
    );

    store.send(add("walk dog")).await.unwrap();
    let ids: Vec<TodoId> = store
        .state(|s| s.items().iter().map(|t| t.id).collect())
        .await;
    assert_eq!(ids, vec![TodoId::new(0), TodoId::new(1)]);

    store
        .send(TodoAction::ToggleCompleted { id: TodoId::new(0) })
        .await
        .unwrap();
    assert!(store.state(|s| s.items()[0].completed).await);

    store
        .send(TodoAction::DeleteTodo { id: TodoId::new(1) })
        .await
        .unwrap();
    let items = store.state(|s| s.items().to_vec()).await;
    assert_eq!(
        items,
        vec![TodoItem {
            id: TodoId::new(0),
            text: "buy milk".to_string(),
            completed: true,
        }]
    );
}

#[tokio::test]
async fn test_todo_actions_produce_no_effects() {
    let store = shared_store();

    let mut handle = store.send(add("a")).await.unwrap();
    assert_eq!(handle.pending(), 0);
    handle.wait().await;
}

#[tokio::test]
async fn test_concurrent_adds_get_unique_ids() {
    let store = shared_store();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store.send(add(&format!("todo {i}"))).await.unwrap();
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            panic!("concurrent add task panicked: {e}");
        }
    }

    let (ids, next_id) = store
        .state(|s| {
            (
                s.items().iter().map(|t| t.id.value()).collect::<Vec<_>>(),
                s.next_id(),
            )
        })
        .await;

    assert_eq!(next_id, 20);
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 20);
    // Ids are handed out in reduction order, so the list is sorted
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_subscribers_observe_actions_in_order() {
    let store = shared_store();
    let mut rx = store.subscribe_actions();

    let actions = vec![
        add("a"),
        TodoAction::ToggleCompleted { id: TodoId::new(0) },
        TodoAction::DeleteTodo { id: TodoId::new(7) },
    ];
    for action in actions.clone() {
        store.send(action).await.unwrap();
    }

    let mut seen = Vec::new();
    for _ in 0..actions.len() {
        seen.push(rx.recv().await.unwrap());
    }
    assert_eq!(seen, actions);
}

#[tokio::test]
async fn test_store_isolation() {
    let first = shared_store();
    let second = shared_store();

    first.send(add("a")).await.unwrap();
    first.send(add("b")).await.unwrap();
    second.send(add("c")).await.unwrap();

    assert_eq!(first.state(|s| s.next_id()).await, 2);
    assert_eq!(second.state(|s| s.next_id()).await, 1);
    assert_eq!(
        second.state(|s| s.items()[0].id).await,
        TodoId::new(0)
    );
}

#[tokio::test]
async fn test_shutdown_rejects_further_actions() {
    let store = shared_store();
    store.send(add("a")).await.unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store.send(add("b")).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    assert_eq!(store.state(|s| s.count()).await, 1);
}
