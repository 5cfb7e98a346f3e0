pub mod agents;
pub mod health;
pub mod metrics;
pub mod statements;
pub mod tasks;
pub mod worker;

use actix_web::HttpResponse;

/// Log a storage failure and turn it into a 500 response
pub fn database_error(context: &str, e: rusqlite::Error) -> HttpResponse {
    log::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": format!("{}: {}", context, e)
    }))
}

pub fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": message }))
}
