//! Shared types for Italian fiscal code (codice fiscale) calculation.
//!
//! - [`character`] -- vowel/consonant classification and letter normalization
//! - [`enums`] -- [`Gender`](enums::Gender) and the month-letter table
//! - [`error`] -- the [`CodiceError`](error::CodiceError) taxonomy

pub mod character;
pub mod enums;
pub mod error;

pub use enums::Gender;
pub use error::{CodiceError, Result};
