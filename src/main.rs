use tera::Tera;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use actix_web::middleware::Logger;

use adrdub::Routes;
use adrdub::store::{self, ConfigStore};
use adrdub::utils::secret::AdminSecret;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let store = store::from_env().await?;
    let secret = AdminSecret::from_env();

    let template = Tera::new("templates/**/*")?;

    let store_data: web::Data<dyn ConfigStore> = web::Data::from(store);

    let bind = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    log::info!("listening on {}", bind);

    HttpServer::new(move || {
        // The static front end may be deployed on any host, so the API stays
        // open to all origins for GET/POST and the preflight OPTIONS.
        let cors = Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(store_data.clone())
            .app_data(web::Data::new(secret.clone()))
            .app_data(web::Data::new(template.clone()))
            .configure(Routes::Config::router)
            .configure(Routes::Pages::router)
    })
    .bind(&bind)?
    .run()
    .await?;

    Ok(())
}
