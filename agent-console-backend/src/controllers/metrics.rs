use actix_web::{web, HttpResponse};

use super::database_error;
use crate::models::ListQuery;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/metrics").route(web::get().to(list_metrics)));
}

/// Most recent metric events, newest first
async fn list_metrics(state: web::Data<AppState>, query: web::Query<ListQuery>) -> HttpResponse {
    match state.db.list_recent_metrics(query.effective_limit()) {
        Ok(metrics) => HttpResponse::Ok().json(metrics),
        Err(e) => database_error("Failed to list metrics", e),
    }
}
