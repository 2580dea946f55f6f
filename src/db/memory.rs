use std::collections::BTreeMap;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::TodoRepository;
use crate::error::AppError;
use crate::models::{Todo, TodoInput};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Todo>,
    last_id: i32,
}

/// In-process `TodoRepository` backing the test suite.
///
/// Ids come from a counter that only moves forward, so an id freed by
/// `delete` is never handed out again.
#[derive(Default)]
pub struct MemoryTodoRepository {
    table: RwLock<Table>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoRepository for MemoryTodoRepository {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, AppError>> {
        Box::pin(async move {
            let table = self.table.read().await;
            Ok(table.rows.values().cloned().collect())
        })
    }

    fn find(&self, id: i32) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        Box::pin(async move { Ok(self.table.read().await.rows.get(&id).cloned()) })
    }

    fn create(&self, input: TodoInput) -> BoxFuture<'_, Result<Todo, AppError>> {
        Box::pin(async move {
            let mut table = self.table.write().await;
            let id = table
                .last_id
                .checked_add(1)
                .ok_or_else(|| AppError::DatabaseError("todo id space exhausted".into()))?;
            table.last_id = id;

            let todo = Todo::new(id, input);
            table.rows.insert(id, todo.clone());
            Ok(todo)
        })
    }

    fn update(&self, id: i32, input: TodoInput) -> BoxFuture<'_, Result<Option<Todo>, AppError>> {
        Box::pin(async move {
            let mut table = self.table.write().await;
            Ok(table.rows.get_mut(&id).map(|todo| {
                todo.apply(input);
                todo.clone()
            }))
        })
    }

    fn delete(&self, id: i32) -> BoxFuture<'_, Result<bool, AppError>> {
        Box::pin(async move { Ok(self.table.write().await.rows.remove(&id).is_some()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn input(title: &str) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: None,
            is_complete: false,
        }
    }

    #[actix_rt::test]
    async fn test_ids_are_unique_and_not_reused() {
        let repo = MemoryTodoRepository::new();
        let mut seen = HashSet::new();

        for i in 0..10 {
            let todo = repo.create(input(&format!("todo {}", i))).await.unwrap();
            assert!(seen.insert(todo.id), "id {} handed out twice", todo.id);
        }

        let last = *seen.iter().max().unwrap();
        assert!(repo.delete(last).await.unwrap());

        let next = repo.create(input("after delete")).await.unwrap();
        assert!(!seen.contains(&next.id));
    }

    #[actix_rt::test]
    async fn test_crud_cycle() {
        let repo = MemoryTodoRepository::new();
        let created = repo.create(input("Write tests")).await.unwrap();

        assert_eq!(repo.find(created.id).await.unwrap(), Some(created.clone()));

        let updated = repo
            .update(
                created.id,
                TodoInput {
                    title: "Write more tests".to_string(),
                    description: Some("edge cases".to_string()),
                    is_complete: true,
                },
            )
            .await
            .unwrap()
            .expect("todo should exist");
        assert_eq!(updated.id, created.id);
        assert!(updated.is_complete);

        assert!(repo.update(999, input("missing")).await.unwrap().is_none());

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.find(created.id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_list_is_ordered_by_id() {
        let repo = MemoryTodoRepository::new();
        for title in ["c", "a", "b"] {
            repo.create(input(title)).await.unwrap();
        }

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
