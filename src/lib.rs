pub mod args;
pub mod commands;
pub mod config;
pub mod snapshot;

#[macro_use]
extern crate log;
