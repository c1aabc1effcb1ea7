pub mod bridge;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod injector;
pub mod server;
pub mod simulator;
