use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use sports_campaigns::config::ServerConfig;
use sports_campaigns::db::{establish_connection_pool, run_migrations};
use sports_campaigns::repository::DieselRepository;
use sports_campaigns::routes;
use sports_campaigns::services::bootstrap::seed_demo_data;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    if config.seed_demo_data {
        match seed_demo_data(&repo) {
            Ok(true) => log::info!("Demo data seeded"),
            Ok(false) => {}
            Err(e) => {
                log::error!("Failed to seed demo data: {e}");
                std::process::exit(1);
            }
        }
    }

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
