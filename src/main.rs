use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use todo_api::config::Config;
use todo_api::db::{PgTodoRepository, TodoRepository};
use todo_api::{build_app, AppError, AppState};

fn startup_error(err: AppError) -> io::Error {
    log::error!("{}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;

    let store = PgTodoRepository::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(startup_error)?;
    if config.run_migrations {
        store.migrate().await.map_err(startup_error)?;
        log::info!("Database schema is up to date");
    }

    let repo: Arc<dyn TodoRepository> = Arc::new(store);
    let state = AppState::new(&config, repo).map_err(startup_error)?;

    log::info!(
        "Starting Todo API at {} ({:?})",
        config.server_url(),
        config.environment
    );
    if config.is_development() {
        log::info!("Swagger UI at {}/swagger/", config.server_url());
    }

    HttpServer::new(move || build_app(state.clone()))
        .bind((config.server_host.as_str(), config.server_port))?
        .run()
        .await
}
