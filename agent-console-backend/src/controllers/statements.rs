use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::analyzer::analyze_statement;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/statements/analyze").route(web::post().to(analyze)));
}

async fn analyze(body: web::Json<AnalyzeRequest>) -> HttpResponse {
    HttpResponse::Ok().json(analyze_statement(&body.text))
}
