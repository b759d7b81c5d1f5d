// Common library for shared code across the API server and tools

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod sql;
pub mod telemetry;
pub mod validation;
