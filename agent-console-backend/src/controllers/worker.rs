use actix_web::{web, HttpResponse};

use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/worker/status").route(web::get().to(worker_status)));
}

async fn worker_status(state: web::Data<AppState>) -> HttpResponse {
    let status = state.worker_stats.snapshot(&state.config.worker).await;
    HttpResponse::Ok().json(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::seeded_state;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_status_before_first_tick() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/worker/status").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["enabled"], false);
        assert_eq!(body["poll_interval_secs"], 2);
        assert_eq!(body["processed"], 0);
        assert!(body["last_tick_at"].is_null());
    }
}
