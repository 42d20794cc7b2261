pub mod a001_category;
pub mod a002_component;
pub mod a003_prebuild_pc;
pub mod a004_user_build;
pub mod a005_compatibility_rule;
pub mod a006_supplier;
pub mod a007_product;
pub mod a008_order;
pub mod settings;
