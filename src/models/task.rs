use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::user::UserSummary;
use crate::tasks::display::format_due_date;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; the wire values are the
/// human-readable board column names.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[serde(rename = "Backlog")]
    #[sqlx(rename = "Backlog")]
    Backlog,
    #[serde(rename = "To do")]
    #[sqlx(rename = "To do")]
    Todo,
    #[serde(rename = "In progress")]
    #[sqlx(rename = "In progress")]
    InProgress,
    #[serde(rename = "Done")]
    #[sqlx(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Maps a raw wire value to the enum. The status-update endpoint accepts
    /// an arbitrary string and must answer 400 on anything outside the enum,
    /// so the mapping is explicit rather than routed through serde.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "Backlog" => Some(TaskStatus::Backlog),
            "To do" => Some(TaskStatus::Todo),
            "In progress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    #[serde(rename = "Low Priority")]
    #[sqlx(rename = "Low Priority")]
    Low,
    #[serde(rename = "Moderate Priority")]
    #[sqlx(rename = "Moderate Priority")]
    Moderate,
    #[serde(rename = "High Priority")]
    #[sqlx(rename = "High Priority")]
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Low
    }
}

/// A checklist entry owned by exactly one task.
///
/// `id` is `None` only between deserialization and the first save; the
/// store assigns a UUID when the entry is persisted, and that identity is
/// the merge key for later checklist updates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subtask {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub subtask: String,
    #[serde(default)]
    pub done: bool,
}

/// A checklist entry as it arrives on the full-update endpoint. Every field
/// is optional: an id selects an existing entry, text and done are applied
/// only when present.
#[derive(Debug, Deserialize, Clone)]
pub struct SubtaskInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub subtask: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    /// Ordered checklist, embedded as a JSONB column.
    pub checklist: Json<Vec<Subtask>>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// The user who created the task; immutable after creation.
    pub owner_id: i32,
    /// Users allowed to move the task between statuses. Invariant: non-empty
    /// and always contains `owner_id`.
    pub assignee_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from the create payload and the owner's id.
    /// Status and priority fall back to their defaults ("To do" /
    /// "Low Priority"); the owner is seeded as the sole assignee.
    pub fn new(input: CreateTaskRequest, owner_id: i32) -> Self {
        let now = Utc::now();
        let checklist = input
            .checklist
            .into_iter()
            .map(|item| Subtask {
                id: None,
                subtask: item.subtask,
                done: item.done,
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            checklist: Json(checklist),
            due_date: input.due_date,
            status: TaskStatus::default(),
            priority: input.priority.unwrap_or_default(),
            owner_id,
            assignee_ids: vec![owner_id],
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input structure for creating a task.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(custom = "validate_checklist")]
    pub checklist: Vec<NewSubtask>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub assigned_user_id: Option<i32>,
}

/// A checklist entry on the create payload: text is mandatory, done
/// defaults to false.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewSubtask {
    pub subtask: String,
    #[serde(default)]
    pub done: bool,
}

fn validate_checklist(checklist: &[NewSubtask]) -> Result<(), ValidationError> {
    if checklist.is_empty() {
        let mut error = ValidationError::new("checklist");
        error.message = Some("Checklist must be a non-empty array of subtasks".into());
        return Err(error);
    }
    if checklist.iter().any(|item| item.subtask.trim().is_empty()) {
        let mut error = ValidationError::new("checklist");
        error.message = Some("Each checklist item must have a subtask property".into());
        return Err(error);
    }
    Ok(())
}

/// Input structure for the full-update endpoint. Title and priority are
/// mandatory resends (there is no partial-update path for them); the
/// checklist is merged, and due date / assignee are applied only when
/// provided.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub priority: TaskPriority,
    #[serde(default)]
    pub checklist: Vec<SubtaskInput>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_user_id: Option<i32>,
}

/// Body of the status-update endpoint. The status arrives as a raw string
/// and is checked against `TaskStatus::from_wire` so an unknown value maps
/// to a 400 rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body of the subtask done-flag endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateSubtaskRequest {
    pub done: bool,
}

/// Query parameters accepted by the task listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Named date-range selector: "week", "month", or "year". Anything else
    /// falls back to the week window; when absent no date constraint is
    /// applied at all.
    #[serde(rename = "filterBy")]
    pub filter_by: Option<String>,
}

/// The shape a task takes in list responses: user references replaced by
/// minimal summaries and the due date rendered for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub checklist: Vec<Subtask>,
    /// Display string like "Jan 2nd"; null when the task has no due date.
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Owner summary; absent when the owner row no longer resolves.
    pub owner: Option<UserSummary>,
    pub assignees: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    /// Shapes a task for the list response, resolving user references
    /// against a pre-fetched id → summary map. References that no longer
    /// resolve are omitted rather than failing the whole listing.
    pub fn build(task: Task, users: &HashMap<i32, UserSummary>) -> Self {
        let owner = users.get(&task.owner_id).cloned();
        let assignees = task
            .assignee_ids
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect();
        Self {
            id: task.id,
            title: task.title,
            checklist: task.checklist.0,
            due_date: format_due_date(task.due_date),
            status: task.status,
            priority: task.priority,
            owner,
            assignees,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
