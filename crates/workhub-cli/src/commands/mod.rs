pub mod admin;
pub mod auth;
pub mod file;
pub mod shell;
pub mod utils;
pub mod workspace;
