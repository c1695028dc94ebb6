use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Subtask, Task, TaskStatus};
use crate::tasks::filter::DateRange;

/// Assigns identities to checklist entries persisted for the first time.
/// Runs on every write path, so a row never stores an id-less entry.
fn assign_subtask_ids(checklist: &mut [Subtask]) {
    for entry in checklist.iter_mut() {
        if entry.id.is_none() {
            entry.id = Some(Uuid::new_v4());
        }
    }
}

/// Loads a task by id.
pub async fn find_by_id(pool: &PgPool, task_id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at \
         FROM tasks WHERE id = $1",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await
}

/// Tasks the user owns or is assigned to, optionally constrained to a due
/// window. Tasks without a due date always pass the window.
pub async fn find_for_user(
    pool: &PgPool,
    user_id: i32,
    range: Option<&DateRange>,
) -> Result<Vec<Task>, sqlx::Error> {
    match range {
        Some(range) => {
            sqlx::query_as::<_, Task>(
                "SELECT id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at \
                 FROM tasks \
                 WHERE (owner_id = $1 OR $1 = ANY(assignee_ids)) \
                   AND (due_date IS NULL OR (due_date >= $2 AND due_date <= $3))",
            )
            .bind(user_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Task>(
                "SELECT id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at \
                 FROM tasks \
                 WHERE owner_id = $1 OR $1 = ANY(assignee_ids)",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await
        }
    }
}

/// Every task in the collection; used by the bulk assign operation.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at \
         FROM tasks",
    )
    .fetch_all(pool)
    .await
}

/// Persists a new task. The returned row carries the database-assigned
/// timestamps and fully-identified checklist entries.
pub async fn insert(pool: &PgPool, mut task: Task) -> Result<Task, sqlx::Error> {
    assign_subtask_ids(&mut task.checklist);
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, checklist, due_date, status, priority, owner_id, assignee_ids) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.checklist)
    .bind(task.due_date)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.owner_id)
    .bind(task.assignee_ids)
    .fetch_one(pool)
    .await
}

/// Writes back a loaded-and-modified task (the full-update and assign
/// paths). New checklist entries get their ids here, before the write.
/// Last write wins: there is no version token guarding the row.
pub async fn save(pool: &PgPool, mut task: Task) -> Result<Task, sqlx::Error> {
    assign_subtask_ids(&mut task.checklist);
    sqlx::query_as::<_, Task>(
        "UPDATE tasks \
         SET title = $2, checklist = $3, due_date = $4, status = $5, priority = $6, assignee_ids = $7, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.checklist)
    .bind(task.due_date)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.assignee_ids)
    .fetch_one(pool)
    .await
}

/// Narrow write for the status-update path; returns None when the task no
/// longer exists.
pub async fn update_status(
    pool: &PgPool,
    task_id: Uuid,
    status: TaskStatus,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET status = $2, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at",
    )
    .bind(task_id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

/// Resolves the (task, subtask) pair and writes the done flag. None when
/// either half of the pair is missing.
pub async fn set_subtask_done(
    pool: &PgPool,
    task_id: Uuid,
    subtask_id: Uuid,
    done: bool,
) -> Result<Option<Task>, sqlx::Error> {
    let mut task = match find_by_id(pool, task_id).await? {
        Some(task) => task,
        None => return Ok(None),
    };
    match task.checklist.iter_mut().find(|s| s.id == Some(subtask_id)) {
        Some(entry) => entry.done = done,
        None => return Ok(None),
    }
    save(pool, task).await.map(Some)
}

/// Removes a single checklist entry. None when the (task, subtask) pair
/// does not resolve.
pub async fn remove_subtask(
    pool: &PgPool,
    task_id: Uuid,
    subtask_id: Uuid,
) -> Result<Option<Task>, sqlx::Error> {
    let mut task = match find_by_id(pool, task_id).await? {
        Some(task) => task,
        None => return Ok(None),
    };
    let before = task.checklist.len();
    task.checklist.retain(|s| s.id != Some(subtask_id));
    if task.checklist.len() == before {
        return Ok(None);
    }
    save(pool, task).await.map(Some)
}

/// Deletes a task, returning the removed row so the response can echo it.
pub async fn delete(pool: &PgPool, task_id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "DELETE FROM tasks WHERE id = $1 \
         RETURNING id, title, checklist, due_date, status, priority, owner_id, assignee_ids, created_at, updated_at",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await
}
