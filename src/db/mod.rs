pub mod admins;
pub mod chat_rooms;
pub mod complaints;
pub mod contracts;
pub mod messages;
pub mod otps;
pub mod reviews;
pub mod skills;
pub mod transactions;
pub mod users;

use sea_orm::{Database, DatabaseConnection};
use std::env;

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
