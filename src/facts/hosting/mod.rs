mod client;

pub use client::{ApiResult, Client, DEFAULT_API_URL};
