//! Drinks domain - the coffee shop menu
//!
//! A drink is a title plus a recipe of colored ingredient parts. The public
//! menu shows recipes without ingredient names; the detail view shows all.

pub mod errors;
pub mod models;

pub use errors::DrinkError;
pub use models::*;
