pub mod auth;
pub mod handlers;
pub mod mail;
pub mod tracing;
pub mod users;
