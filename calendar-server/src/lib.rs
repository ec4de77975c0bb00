//! HTTP front end serving month views and day layouts from a JSON event list.

pub mod cache;
pub mod cli;
pub mod server;
pub mod source;

pub use server::{router, AppState};
pub use source::EventSource;
