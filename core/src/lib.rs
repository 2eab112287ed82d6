//! Build, run and read back AIRES/ZHAireS air-shower simulations.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod rundir;
pub mod runner;
pub mod tables;
pub mod task;
pub mod util;
