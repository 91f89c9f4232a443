//! # Key shop server
//! The HTTP front of the key shop storefront. It is responsible for:
//! * Serving the live storefront counters, refreshed from Redis, MongoDB and the Steam market at most once per TTL.
//! * Accepting settlement callbacks from the payment gateway and writing them onto orders.
//! * Giving administrators a read-only view of the payment gateway orders.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/v1/bot/status`: The storefront counters.
//! * `/api/v1/payment/cb`: The payment gateway callback.
//! * `/api/v1/orders/v2` and `/api/v1/orders/v2/{id}`: Admin order views.
pub mod access;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod status_worker;

#[cfg(test)]
mod endpoint_tests;
