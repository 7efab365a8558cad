//! Core types shared across depdot.
//!
//! Currently this is the error stack: the [`DepdotError`] taxonomy, the
//! [`ErrorContext`] display wrapper, and the [`user_friendly_error`]
//! conversion used at the binary boundary.

pub mod error;

pub use error::{DepdotError, ErrorContext, user_friendly_error};
