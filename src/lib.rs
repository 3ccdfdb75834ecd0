#![forbid(unsafe_code)]

pub mod agents;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod home;
pub mod logging;
pub mod server;
pub mod store;
pub mod utils;
