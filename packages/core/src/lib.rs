// Library root — exposes the bot's modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod cli;
pub mod config;
pub mod error;
pub mod homework;
pub mod logging;
pub mod scheduler;
pub mod services;
