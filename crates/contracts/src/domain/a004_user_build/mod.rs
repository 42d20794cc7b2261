pub mod aggregate;

pub use aggregate::{BuildEntry, BuildType, UserBuild, UserBuildDto};
