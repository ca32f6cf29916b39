use actix_web::{middleware::{DefaultHeaders, Logger}, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use rescue_backend::{config::Config, routes, AppState};
use std::path::PathBuf;

/// A simple handler for the root URL.
async fn root_handler() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

#[derive(Parser, Debug)]
#[command(name = "rescue_server", author, version, about = "Starts the animal rescue API server.")]
struct Cli {
    /// Path to a .env configuration file. Defaults to ./.env when present.
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env(cli.env_file.as_deref())
        .expect("FATAL: Failed to load or parse configuration.");

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let app_state = web::Data::new(
        AppState::from_config(&config).expect("FATAL: Failed to initialise the geocoder client."),
    );
    {
        let store = app_state.read_store();
        log::info!(
            "Data store seeded with {} posts and {} profiles.",
            store.posts().len(),
            store.profiles().len()
        );
    }

    let server_address = config.server_address();
    log::info!("Server starting at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block"))
            )
            .app_data(app_state.clone())
            .configure(routes::config_api)
            .route("/", web::get().to(root_handler))
    })
    .bind(server_address)?
    .run()
    .await
}
