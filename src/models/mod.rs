pub mod task;
pub mod user;

pub use task::{
    CreateTaskRequest, ListTasksQuery, NewSubtask, Subtask, SubtaskInput, Task, TaskPriority,
    TaskStatus, TaskView, UpdateStatusRequest, UpdateSubtaskRequest, UpdateTaskRequest,
};
pub use user::{UpdateProfileRequest, User, UserSummary};
