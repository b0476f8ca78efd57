//! # Registrar Store
//!
//! Student storage backends.
//!
//! The [`StudentStore`] trait isolates the storage policy from the HTTP
//! layer; handlers only ever see the trait, so a real backing store can be
//! swapped in later without touching them. [`MemoryStore`] is the default
//! process-local backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::{MemoryStore, StudentStore};
