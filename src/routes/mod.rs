pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers every route under the `/api` scope. Registration order matters
/// within the task scope: literal segments ("count", "update",
/// "assign-all") must be declared before the parameterized routes that
/// would otherwise swallow them, and the single-segment routes before the
/// two-segment subtask routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login),
    )
    .service(
        web::scope("/users")
            .service(users::list_users)
            .service(users::update_profile)
            .service(users::get_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::task_counts)
            .service(tasks::create_task)
            .service(tasks::assign_all)
            .service(tasks::update_task)
            .service(tasks::update_status)
            .service(tasks::update_subtask)
            .service(tasks::get_task)
            .service(tasks::delete_task)
            .service(tasks::delete_subtask),
    );
}
