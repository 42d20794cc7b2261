pub mod aggregate;

pub use aggregate::{Supplier, SupplierComment, SupplierDto, SupplierProduct, SupplierRating};
