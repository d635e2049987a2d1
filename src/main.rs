use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use voyage_api::config::Settings;
use voyage_api::context::AppContext;
use voyage_api::db::mongo::{create_mongo_client, MongoStore};
use voyage_api::routes;
use voyage_api::services::admin_accounts::PasswordVerifier;
use voyage_api::services::token_service::TokenService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let client = create_mongo_client(&settings.mongo_uri)
        .await
        .map_err(io::Error::other)?;
    let store = MongoStore::new(client, settings.database_name.as_deref());
    log::info!("Using database {}", store.database_name());

    let context = web::Data::new(AppContext::new(
        Arc::new(store),
        TokenService::new(&settings.jwt_secret, settings.access_token_minutes),
        PasswordVerifier::new(settings.bcrypt_cost),
    ));

    log::info!("Starting HTTP server on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(context.clone())
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
