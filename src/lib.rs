pub mod auth;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod payments;

pub use db::create_pool;
