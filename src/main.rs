use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, LevelFilter};

use solscan_proxy::config::Config;
use solscan_proxy::routes::configure_routes;
use solscan_proxy::services::SolscanClient;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, default_value = "config/config.toml")]
    config: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    let config = Config::load(&args.config);

    info!("Starting Solscan proxy...");
    info!("Upstream: {}", config.solscan.base_url);

    let client = SolscanClient::new(&config.solscan).map_err(|e| {
        error!("Failed to initialize Solscan client: {:#}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if config.solscan.resolve_api_key().is_none() {
        // The key is resolved per request, so it may still be provided later
        info!(
            "Solscan API key not configured; set solscan.api_key or {}",
            config.solscan.api_key_env
        );
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server will be available at http://{}", bind_addr);

    let config = Arc::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(client.clone()))
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
