use actix_web::{middleware::Logger, App, HttpServer};
use std::sync::Arc;
use user_routes::auth::jwt::JwtService;
use user_routes::auth::middleware::SessionMiddleware;
use user_routes::config::load_config;
use user_routes::postgres::config::{create_pool, health_check};
use user_routes::postgres::database::PgUserStore;
use user_routes::types::{AppConfig, StartupError};
use user_routes::user::repository::{MemoryUserStore, UserStore};
use user_routes::{configure_app, cors_from_config, SERVICE_NAME, VERSION};

async fn build_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, StartupError> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections)?;
            health_check(&pool).await?;

            let store = PgUserStore::new(pool);
            store.migrate().await?;
            log::info!("using PostgreSQL user store");
            Ok(Arc::new(store))
        },
        None => {
            log::warn!("DATABASE_URL not set, users are kept in memory only");
            Ok(Arc::new(MemoryUserStore::new()))
        },
    }
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    let config = load_config()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::info!("starting {SERVICE_NAME} v{VERSION} on {}", config.bind_address);

    let store = build_store(&config).await?;
    let jwt_service = JwtService::new(&config.jwt_secret);
    let app_config = config.clone();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(jwt_service.clone()))
            .wrap(cors_from_config(&app_config))
            .wrap(Logger::default())
            .configure(configure_app(store.clone()))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind(&config.bind_address)
        .map_err(|e| StartupError::ServerBind(e.to_string()))?
        .run()
        .await
        .map_err(|e| StartupError::ServerBind(e.to_string()))
}
