// HTTP middleware and extractors
pub mod extractors;
pub mod jwt_auth;

pub use extractors::*;
pub use jwt_auth::*;
