//! Writes the cameras of a remote account into a MediaMTX configuration file
//! as relay paths.

pub mod app_config;
pub mod camera_record;
pub mod cli;
pub mod clients;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod operations;
