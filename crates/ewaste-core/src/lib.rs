//! # E-Waste Core
//!
//! The domain layer of the e-waste pickup client.
//! This crate holds the data model, client-side validation, the request wizard
//! and tracking timeline, and the port traits the adapters implement. It has
//! zero transport or storage dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::DomainError;
