use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use lexmarket_backend::chat::server::ChatServer;
use lexmarket_backend::config::AppConfig;
use lexmarket_backend::create_pool;
use lexmarket_backend::db::admins as admin_db;
use lexmarket_backend::handlers;
use lexmarket_backend::mailer::Mailer;
use lexmarket_backend::payments::PaymentClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let db = create_pool().await;

    let super_admin_hash = bcrypt::hash(&config.super_admin_password, bcrypt::DEFAULT_COST)
        .expect("Failed to hash super-admin password");
    admin_db::bootstrap_super_admin(&db, &config.super_admin_email, super_admin_hash)
        .await
        .expect("Failed to bootstrap super-admin");

    let mailer = Mailer::new(&config).expect("Failed to initialize mailer");
    let payment_client = PaymentClient::new(
        config.payment_api_base.clone(),
        config.payment_secret_key.clone(),
    );

    let upload_dir = config.upload_dir.clone();
    std::fs::create_dir_all(&upload_dir)?;

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config);
    let mailer_data = web::Data::new(mailer);
    let payment_data = web::Data::new(payment_client);

    // Shared chat server (room manager for WebSocket connections).
    let chat_server = web::Data::new(Arc::new(ChatServer::new()));

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .app_data(mailer_data.clone())
            .app_data(payment_data.clone())
            .app_data(chat_server.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new("/static", upload_dir.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
