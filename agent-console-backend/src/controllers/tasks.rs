use actix_web::{web, HttpResponse};
use std::str::FromStr;

use super::{database_error, not_found};
use crate::models::{AgentKind, CreateTaskRequest, ListQuery};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .route("", web::get().to(list_tasks))
            .route("", web::post().to(create_task))
            .route("/{id}", web::get().to(get_task)),
    );
}

/// Most recent tasks, newest first
async fn list_tasks(state: web::Data<AppState>, query: web::Query<ListQuery>) -> HttpResponse {
    match state.db.list_recent_tasks(query.effective_limit()) {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(e) => database_error("Failed to list tasks", e),
    }
}

async fn get_task(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match state.db.get_task(id) {
        Ok(Some(task)) => HttpResponse::Ok().json(task),
        Ok(None) => not_found("Task not found"),
        Err(e) => database_error("Failed to load task", e),
    }
}

/// Queue a task for the agent of the requested type. The worker picks it up on its next tick.
async fn create_task(
    state: web::Data<AppState>,
    body: web::Json<CreateTaskRequest>,
) -> HttpResponse {
    let description = body.description.trim();
    if description.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Task description must not be empty"
        }));
    }

    let Ok(kind) = AgentKind::from_str(body.agent_type.trim()) else {
        log::warn!("Task submitted for unknown agent type {:?}", body.agent_type);
        return not_found("Agent not found");
    };

    let agent = match state.db.get_agent_by_kind(kind) {
        Ok(Some(agent)) => agent,
        Ok(None) => return not_found("Agent not found"),
        Err(e) => return database_error("Failed to look up agent", e),
    };

    match state.db.create_task(description, agent.id) {
        Ok(task) => {
            log::info!("Queued task {} for {}", task.id, agent.name);
            HttpResponse::Ok().json(task)
        }
        Err(e) => database_error("Failed to create task", e),
    }
}
