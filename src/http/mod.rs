//! HTTP dashboard: JSON API plus the embedded page that draws it

pub mod handler;
pub mod server;

pub use server::{router, HttpServer};
