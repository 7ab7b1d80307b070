//! Core types and trait definitions for the Holocron catalog and favorites
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement the traits in [`store`]; transports drive the services
//! in [`service`].

pub mod catalog;
pub mod error;
pub mod favorite;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, Result};
