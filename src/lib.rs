pub mod cli;
pub mod config;
pub mod flags;
pub mod logging;
