use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod agents;
mod analyzer;
mod config;
mod controllers;
mod db;
mod models;
mod worker;

use agents::HandlerRegistry;
use config::Config;
use db::Database;
use worker::{Worker, WorkerStats};

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    pub worker_stats: Arc<WorkerStats>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Initializing database at {}", config.database_url);
    let db = Database::new(&config.database_url).expect("Failed to initialize database");
    let db = Arc::new(db);

    let seeded = db.seed_agents().expect("Failed to seed agents");
    log::info!("Seeded {} new agent(s)", seeded);

    let handlers = Arc::new(HandlerRegistry::default());
    log::info!("Registered {} task handlers", handlers.len());

    let worker = Arc::new(Worker::new(db.clone(), handlers, config.worker.clone()));
    let worker_stats = worker.stats();

    let (worker_shutdown_tx, worker_shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = if worker.config().enabled {
        let worker = Arc::clone(&worker);
        Some(tokio::spawn(async move {
            worker.start(worker_shutdown_rx).await;
        }))
    } else {
        log::warn!("Task worker disabled - submitted tasks will stay pending");
        None
    };

    // Static dashboard is optional; skip it when the directory is missing
    let static_dir = match config.static_dir.as_deref() {
        Some(dir) if std::path::Path::new(dir).is_dir() => Some(dir.to_string()),
        Some(dir) => {
            log::warn!("Static directory {} not found - dashboard serving disabled", dir);
            None
        }
        None => {
            log::info!("Frontend serving disabled via DISABLE_FRONTEND env var");
            None
        }
    };

    let bind = (config.bind_address.clone(), config.port);
    log::info!("Starting agent console on http://{}:{}", bind.0, bind.1);
    if let Some(dir) = &static_dir {
        log::info!("Serving dashboard from: {}", dir);
    }

    let state_config = config.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: state_config.clone(),
                worker_stats: Arc::clone(&worker_stats),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::agents::config)
            .configure(controllers::tasks::config)
            .configure(controllers::metrics::config)
            .configure(controllers::worker::config)
            .configure(controllers::statements::config);

        // Must stay last: "/" would otherwise shadow the API routes
        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind(bind)?
    .run()
    .await;

    // The receiver is gone if the worker never started
    let _ = worker_shutdown_tx.send(());
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            log::error!("Task worker panicked: {}", e);
        }
    }

    server
}
