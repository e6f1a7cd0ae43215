//! Kernel module - server infrastructure and dependencies.

pub mod drink_store;
pub mod test_dependencies;
pub mod traits;

pub use drink_store::PgDrinkStore;
pub use test_dependencies::MockDrinkStore;
pub use traits::*;
