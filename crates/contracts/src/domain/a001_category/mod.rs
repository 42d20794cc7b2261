pub mod aggregate;

pub use aggregate::{Category, CategoryDto, FieldDef, FieldType, FieldValidation};
