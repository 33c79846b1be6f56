pub mod api;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
