use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{
        CreateTaskRequest, ListTasksQuery, Task, TaskView, UpdateStatusRequest,
        UpdateSubtaskRequest, UpdateTaskRequest,
    },
    store,
    tasks::{access, checklist, counts, filter},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks: everything they own or are
/// assigned to.
///
/// ## Query Parameters:
/// - `filterBy` (optional): "week", "month", or "year"; constrains results
///   to a trailing due-date window ending today. Unrecognized values behave
///   as "week"; when the parameter is absent no date constraint applies.
///   Tasks without a due date are always included, filtered or not.
///
/// Results carry owner/assignee summaries instead of raw ids and the due
/// date rendered for display ("Jan 2nd"). No ordering is guaranteed.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<ListTasksQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let range = query
        .filter_by
        .as_deref()
        .map(|key| filter::resolve(key, Utc::now()));

    let tasks = store::tasks::find_for_user(&pool, user.0, range.as_ref()).await?;

    // One round trip for every user referenced across the page of results.
    let mut user_ids: Vec<i32> = tasks
        .iter()
        .flat_map(|task| {
            task.assignee_ids
                .iter()
                .copied()
                .chain(std::iter::once(task.owner_id))
        })
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let summaries = store::users::summaries_by_ids(&pool, &user_ids).await?;
    let users: HashMap<i32, _> = summaries.into_iter().map(|s| (s.id, s)).collect();

    let views: Vec<TaskView> = tasks
        .into_iter()
        .map(|task| TaskView::build(task, &users))
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "message": "Tasks retrieved successfully",
        "tasks": views
    })))
}

/// Dashboard counts for the authenticated user: per-status and per-priority
/// tallies plus the number of tasks carrying a due date. No date filter is
/// applied here; the dashboard always reflects the whole board.
#[get("/count")]
pub async fn task_counts(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::find_for_user(&pool, user.0, None).await?;
    let counts = counts::aggregate(&tasks);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task counts retrieved successfully",
        "taskCounts": counts
    })))
}

/// Retrieves a single task by id. This route is exempt from the auth
/// middleware: anyone holding a task id may fetch it.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    match store::tasks::find_by_id(&pool, task_id.into_inner()).await? {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Task retrieved successfully",
            "task": task
        }))),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Creates a task owned by the caller. The owner is always the first
/// assignee; an optional `assignedUserId` adds a second one, provided the
/// user exists and is not the owner.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    body: web::Json<CreateTaskRequest>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let input = body.into_inner();

    let assigned_user_id = input.assigned_user_id;
    let mut task = Task::new(input, user.0);

    if let Some(assigned) = assigned_user_id {
        if assigned != user.0 {
            if !store::users::exists(&pool, assigned).await? {
                return Err(AppError::NotFound("Assigned user not found".into()));
            }
            task.assignee_ids.push(assigned);
        }
    }

    let task = store::tasks::insert(&pool, task).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "task": task
    })))
}

/// Full update of a task by id: title and priority are overwritten from the
/// payload, the checklist is merged (update-in-place by subtask id, append
/// when the id is absent), the due date is replaced only when sent, and an
/// optional assignee is appended after being resolved.
///
/// Any authenticated caller may update any task by id; there is no
/// ownership check on this path.
#[patch("/update/{task_id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    body: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let input = body.into_inner();

    let mut task = match store::tasks::find_by_id(&pool, task_id.into_inner()).await? {
        Some(task) => task,
        None => return Err(AppError::NotFound("Task not found".into())),
    };

    task.title = input.title;
    task.priority = input.priority;
    checklist::merge_checklist(&mut task.checklist, input.checklist);

    if let Some(due_date) = input.due_date {
        task.due_date = Some(due_date);
    }

    if let Some(assigned) = input.assigned_user_id {
        if !task.assignee_ids.contains(&assigned) {
            if !store::users::exists(&pool, assigned).await? {
                return Err(AppError::NotFound("Assigned user not found".into()));
            }
            task.assignee_ids.push(assigned);
        }
    }

    let task = store::tasks::save(&pool, task).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": task
    })))
}

/// Moves a task to another status. Only assignees (which always includes
/// the owner) may do this; the task must exist before the permission
/// question is even asked, so a missing task answers 404, a present task
/// with a non-member caller 403.
#[patch("/{id}")]
pub async fn update_status(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let status = crate::models::TaskStatus::from_wire(&body.status)
        .ok_or_else(|| AppError::BadRequest("Invalid status value".into()))?;

    let task = match store::tasks::find_by_id(&pool, task_id.into_inner()).await? {
        Some(task) => task,
        None => return Err(AppError::NotFound("Task not found".into())),
    };

    if !access::can_access(&task, user.0) {
        return Err(AppError::Forbidden(
            "Not authorized to update this task".into(),
        ));
    }

    let task = store::tasks::update_status(&pool, task.id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task status updated successfully",
        "task": task
    })))
}

/// Adds a user to every task's assignee list. Idempotent: tasks already
/// listing the user are passed through unchanged. Tasks are written one by
/// one; a crash mid-way leaves the earlier writes in place.
#[post("/assign-all/{id}")]
pub async fn assign_all(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();

    let tasks = store::tasks::find_all(&pool).await?;
    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found to assign".into()));
    }

    let mut updated = Vec::with_capacity(tasks.len());
    for mut task in tasks {
        if !task.assignee_ids.contains(&user_id) {
            task.assignee_ids.push(user_id);
            task = store::tasks::save(&pool, task).await?;
        }
        updated.push(task);
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "All tasks assigned successfully",
        "tasks": updated
    })))
}

/// Flips a single checklist entry's done flag, addressed by the
/// (task, subtask) id pair.
#[patch("/{task_id}/{subtask_id}")]
pub async fn update_subtask(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<UpdateSubtaskRequest>,
) -> Result<impl Responder, AppError> {
    let (task_id, subtask_id) = path.into_inner();

    match store::tasks::set_subtask_done(&pool, task_id, subtask_id, body.done).await? {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Subtask status updated successfully",
            "task": task
        }))),
        None => Err(AppError::NotFound("Task or subtask not found".into())),
    }
}

/// Deletes a task by id. Like the full update, this path has no ownership
/// check.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    match store::tasks::delete(&pool, task_id.into_inner()).await? {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Task deleted successfully",
            "task": task
        }))),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Removes a single checklist entry from a task.
#[delete("/{task_id}/{subtask_id}")]
pub async fn delete_subtask(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (task_id, subtask_id) = path.into_inner();

    match store::tasks::remove_subtask(&pool, task_id, subtask_id).await? {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Subtask deleted successfully",
            "task": task
        }))),
        None => Err(AppError::NotFound("Task or subtask not found".into())),
    }
}
