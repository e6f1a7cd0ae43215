// HTTP routes
pub mod drinks;
pub mod health;
pub mod index;

pub use drinks::*;
pub use health::*;
pub use index::*;
