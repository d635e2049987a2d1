//! REST backend for a travel agency: clients, reservations, reviews and
//! packages stored in MongoDB, plus token-based admin access.

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
