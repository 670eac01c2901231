mod client;

pub use client::HasuraClient;
