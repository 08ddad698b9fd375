mod admins;
mod checklist;
mod config;
mod credentials;
mod error;
mod roster;
mod services;
mod state;

use std::io;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use crate::config::AppConfig;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };
    std::fs::create_dir_all(&config.data_dir)?;

    let state = AppState::load(config.clone());
    {
        let roster = state.roster.read().await;
        info!(
            "roster loaded: {} appliances, {} maintenance appliances",
            roster.known_appliances().len(),
            roster.known_maintenance_appliances().len()
        );
    }

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(state.clone()))
            .service(services::auth::configure_routes())
            .service(services::roster::configure_routes())
            .service(services::checklists::configure_routes())
            .service(services::admin::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
