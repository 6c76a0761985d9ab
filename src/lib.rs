pub mod api;
pub mod config;
pub mod handlers;
pub mod models;
pub mod purchase;
pub mod routes;
pub mod state;
pub mod utils;
