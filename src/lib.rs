//! # Veterinary CRM Library
//!
//! Core of the clinic CRM service: customers and their pets, served as HTML
//! pages and a read-only JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
