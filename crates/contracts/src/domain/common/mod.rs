mod money;
mod slug;

pub use money::Money;
pub use slug::slugify;

/// Default currency used when a price is created without one.
pub const DEFAULT_CURRENCY: &str = "AED";
