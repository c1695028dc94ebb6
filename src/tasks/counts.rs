use serde::Serialize;

use crate::models::{Task, TaskPriority, TaskStatus};

/// Dashboard tally of a user's tasks. All buckets are declared up front and
/// zero-initialized, so categories with no tasks still serialize as 0
/// instead of going missing.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub status: StatusCounts,
    pub priority: PriorityCounts,
    pub due_date_count: u64,
}

/// Field names are the bucket keys: the lower-cased, space-stripped wire
/// value of each status.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub backlog: u64,
    pub todo: u64,
    pub inprogress: u64,
    pub done: u64,
}

/// Same keying scheme as `StatusCounts`, for priorities.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct PriorityCounts {
    pub lowpriority: u64,
    pub moderatepriority: u64,
    pub highpriority: u64,
}

/// Single pass over the task list. The enum → bucket mapping is spelled out
/// per variant; `due_date_count` counts every task carrying a due date.
pub fn aggregate(tasks: &[Task]) -> TaskCounts {
    let mut counts = TaskCounts::default();
    for task in tasks {
        match task.status {
            TaskStatus::Backlog => counts.status.backlog += 1,
            TaskStatus::Todo => counts.status.todo += 1,
            TaskStatus::InProgress => counts.status.inprogress += 1,
            TaskStatus::Done => counts.status.done += 1,
        }
        match task.priority {
            TaskPriority::Low => counts.priority.lowpriority += 1,
            TaskPriority::Moderate => counts.priority.moderatepriority += 1,
            TaskPriority::High => counts.priority.highpriority += 1,
        }
        if task.due_date.is_some() {
            counts.due_date_count += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTaskRequest, NewSubtask};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn task(status: TaskStatus, priority: TaskPriority, with_due: bool) -> Task {
        let mut task = Task::new(
            CreateTaskRequest {
                title: "counted".to_string(),
                checklist: vec![NewSubtask {
                    subtask: "step".to_string(),
                    done: false,
                }],
                due_date: with_due.then(Utc::now),
                priority: Some(priority),
                assigned_user_id: None,
            },
            1,
        );
        task.status = status;
        task
    }

    #[test]
    fn test_empty_list_yields_all_zero_buckets() {
        let counts = aggregate(&[]);
        assert_eq!(counts, TaskCounts::default());

        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["status"]["backlog"], 0);
        assert_eq!(json["status"]["done"], 0);
        assert_eq!(json["priority"]["highpriority"], 0);
        assert_eq!(json["dueDateCount"], 0);
    }

    #[test]
    fn test_bucket_keys_are_the_normalized_wire_values() {
        let json = serde_json::to_value(aggregate(&[])).unwrap();

        let status_keys: Vec<&str> = json["status"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(status_keys, vec!["backlog", "todo", "inprogress", "done"]);

        let priority_keys: Vec<&str> = json["priority"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            priority_keys,
            vec!["lowpriority", "moderatepriority", "highpriority"]
        );
    }

    #[test]
    fn test_single_pass_tally() {
        let tasks = vec![
            task(TaskStatus::Backlog, TaskPriority::Low, false),
            task(TaskStatus::Todo, TaskPriority::Low, true),
            task(TaskStatus::Todo, TaskPriority::Moderate, true),
            task(TaskStatus::InProgress, TaskPriority::High, false),
            task(TaskStatus::Done, TaskPriority::High, true),
        ];

        let counts = aggregate(&tasks);
        assert_eq!(counts.status.backlog, 1);
        assert_eq!(counts.status.todo, 2);
        assert_eq!(counts.status.inprogress, 1);
        assert_eq!(counts.status.done, 1);
        assert_eq!(counts.priority.lowpriority, 2);
        assert_eq!(counts.priority.moderatepriority, 1);
        assert_eq!(counts.priority.highpriority, 2);
        assert_eq!(counts.due_date_count, 3);
    }
}
