pub mod app;
pub mod aspect;
pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
