use crate::models::Task;

/// A user may read a task or change its status when they own it or appear
/// in its assignee list. The owner is always an assignee by construction,
/// so one membership test answers both questions.
///
/// Callers must check task existence first: a missing task is NotFound, a
/// present task with a non-member caller is Forbidden.
pub fn can_access(task: &Task, user_id: i32) -> bool {
    task.owner_id == user_id || task.assignee_ids.contains(&user_id)
}
