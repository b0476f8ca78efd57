//! # Registrar Server
//!
//! HTTP JSON API over the student store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod server;

pub use server::{Server, ServerConfig};
