pub mod aggregate;

pub use aggregate::{resolve_tag_rules, CompatibilityRule, CompatibilityRuleDto, TagRule};
