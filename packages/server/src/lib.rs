// Drinks API - Core
//
// Coffee shop menu backend. Anyone may browse the menu; baristas and managers
// read full recipes and edit the menu with permissions granted by Auth0.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
