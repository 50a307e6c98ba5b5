//! # EcoCycle Shared
//!
//! Wire types of the EcoCycle backend API.

pub mod dto;
pub mod response;

pub use response::{DEFAULT_ERROR_MESSAGE, ErrorBody, parse_body};
