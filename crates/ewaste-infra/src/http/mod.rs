//! Backend API adapter over reqwest.

mod auth;
mod client;
mod profile;
mod requests;

pub use client::{DEFAULT_API_BASE_URL, HttpApiClient, HttpClientConfig};
