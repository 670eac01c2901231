//! Authentication decorators for [`HttpClient`](crate::fetch::HttpClient)
//! implementations.

mod admin_secret;

pub use admin_secret::AdminSecret;
