pub mod assembler;
pub mod bootstrap;
pub mod cli;
pub mod comments;
pub mod config;
pub mod database;
pub mod error;
pub mod likes;
pub mod sources;
pub mod telemetry;
pub mod threading;
pub mod users;
pub mod utils;
