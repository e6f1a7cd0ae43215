/// A capability string that must appear in a token's `permissions` claim.
///
/// Implemented by zero-sized marker types so a route can name its
/// requirement in the extractor type, e.g. `RequirePermission<PostDrinks>`.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

macro_rules! permissions {
    ($($(#[$meta:meta])* $ty:ident => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $ty;

            impl Permission for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

permissions! {
    /// View full recipes, ingredient names included
    GetDrinksDetail => "get:drinks-detail",
    /// Add drinks to the menu
    PostDrinks => "post:drinks",
    /// Edit existing drinks
    PatchDrinks => "patch:drinks",
    /// Remove drinks from the menu
    DeleteDrinks => "delete:drinks",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_names() {
        assert_eq!(GetDrinksDetail::NAME, "get:drinks-detail");
        assert_eq!(PostDrinks::NAME, "post:drinks");
        assert_eq!(PatchDrinks::NAME, "patch:drinks");
        assert_eq!(DeleteDrinks::NAME, "delete:drinks");
    }
}
