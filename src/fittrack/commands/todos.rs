use crate::commands::helpers::{required, resolve};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Todo;
use crate::store::{KvBackend, RecordStore};
use chrono::NaiveDate;

pub fn add<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    title: &str,
    due_date: Option<NaiveDate>,
) -> Result<CmdResult> {
    let mut todo = Todo::new(user, required("Title", title)?);
    todo.due_date = due_date;
    store.save(&todo)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Todo added: {}", todo.title)));
    Ok(result.with_todos(vec![todo]))
}

/// Flip the completed flag. The todo keeps its position in the list.
pub fn toggle<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    todo_id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(mut todo) = resolve::<B, Todo>(store, user, todo_id)? else {
        result.add_message(CmdMessage::warning(format!("No todo {}", todo_id)));
        return Ok(result);
    };

    todo.completed = !todo.completed;
    store.save(&todo)?;
    let state = if todo.completed { "done" } else { "open" };
    result.add_message(CmdMessage::success(format!("{} marked {}", todo.title, state)));
    Ok(result.with_todos(vec![todo]))
}

pub fn list<B: KvBackend>(store: &RecordStore<B>, user: &str) -> Result<CmdResult> {
    let todos = store.list::<Todo>(user);
    let done = todos.iter().filter(|t| t.completed).count();

    let mut result = CmdResult::default();
    if todos.is_empty() {
        result.add_message(CmdMessage::info("No todos"));
    } else {
        result.add_message(CmdMessage::info(format!("{}/{} completed", done, todos.len())));
    }
    Ok(result.with_todos(todos))
}

pub fn delete<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    todo_id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match resolve::<B, Todo>(store, user, todo_id)? {
        Some(todo) => {
            store.delete::<Todo>(&todo.id)?;
            result.add_message(CmdMessage::success(format!("Todo deleted: {}", todo.title)));
            Ok(result.with_todos(vec![todo]))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("No todo {}", todo_id)));
            Ok(result)
        }
    }
}
