//! Resolution service API and its HTTP client

pub mod client;
pub mod service;

pub use self::client::*;
pub use self::service::*;
