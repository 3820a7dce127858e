//! Backend API access.

mod client;

pub use client::FetchSource;
