use actix_web::{web, HttpResponse};

use super::{database_error, not_found};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/agents")
            .route("", web::get().to(list_agents))
            .route("/{id}", web::get().to(get_agent)),
    );
}

async fn list_agents(state: web::Data<AppState>) -> HttpResponse {
    match state.db.list_agents() {
        Ok(agents) => HttpResponse::Ok().json(agents),
        Err(e) => database_error("Failed to list agents", e),
    }
}

async fn get_agent(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match state.db.get_agent(id) {
        Ok(Some(agent)) => HttpResponse::Ok().json(agent),
        Ok(None) => not_found("Agent not found"),
        Err(e) => database_error("Failed to load agent", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::seeded_state;
    use crate::models::Agent;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_list_agents_returns_seeded_agents() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/agents").to_request();
        let agents: Vec<Agent> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(agents.len(), 3);

        let req = test::TestRequest::get()
            .uri(&format!("/api/agents/{}", agents[1].id))
            .to_request();
        let agent: Agent = test::call_and_read_body_json(&app, req).await;
        assert_eq!(agent.name, "Support Agent");
    }

    #[actix_web::test]
    async fn test_unknown_agent_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/agents/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
