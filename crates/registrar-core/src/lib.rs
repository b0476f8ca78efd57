//! # Registrar Core
//!
//! Core types shared across the registrar crates:
//! - Common error types
//! - The [`Student`] record, its grades, and the derived average
//! - Record id generation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod student;

pub use error::{Error, Result};
pub use student::{grade_average, student_id, Grade, NewStudent, Student, MAX_GRADES};
