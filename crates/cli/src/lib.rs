pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod state_store;
