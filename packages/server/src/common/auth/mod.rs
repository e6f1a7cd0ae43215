//! Authorization primitives shared by the token verifier and the route guard.

mod errors;
mod permission;

pub use errors::AuthError;
pub use permission::{DeleteDrinks, GetDrinksDetail, PatchDrinks, Permission, PostDrinks};
