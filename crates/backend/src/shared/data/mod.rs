pub mod db;
pub mod sequence;
