//! Core translation engine module

pub mod client;
pub mod config;
pub mod errors;
pub mod history;
pub mod links;
pub mod models;
pub mod script;
