//! Italian fiscal code (codice fiscale) calculator.
//!
//! Computes the 16-character code from name, surname, gender, birth date
//! and birthplace.
//!
//! # Architecture
//!
//! - [`attributes`] -- input records and validation
//! - [`encoder`] -- surname, name, birth and birthplace field encoders
//! - [`checksum`] -- check character over the first 15 characters
//! - [`places`] -- place-code tables (built-in and CSV-loaded)
//! - [`resolver`] -- place/country resolver seams and override slots
//! - [`calculator`] -- [`Calculator`], the validating pipeline
//! - [`config`] -- process-wide resolver overrides used by [`calculate`]
//!
//! ```
//! use chrono::NaiveDate;
//! use codice_fiscale::{Birthplace, Calculator, Gender, PersonalAttributes};
//!
//! let attributes = PersonalAttributes::new(
//!     "mario",
//!     "rossi",
//!     Gender::Male,
//!     NaiveDate::from_ymd_opt(1987, 1, 1).unwrap(),
//!     Birthplace::domestic("Abbadia Lariana", "lc"),
//! );
//! let code = Calculator::new().calculate(&attributes).unwrap();
//! assert_eq!(code.as_str(), "RSSMRA87A01A005V");
//! ```

pub mod attributes;
pub mod calculator;
pub mod checksum;
pub mod config;
pub mod encoder;
pub mod places;
pub mod resolver;

pub use attributes::{AttributeRecord, Birthplace, PersonalAttributes};
pub use calculator::{Calculator, FiscalCode};
pub use codice_core::{CodiceError, Gender, Result};
pub use places::PlaceTable;
pub use resolver::{CountryResolver, PlaceResolver, Resolvers};

/// Compute a fiscal code with the built-in table and the process-wide
/// resolvers installed through [`config`].
pub fn calculate(attributes: &PersonalAttributes) -> Result<FiscalCode> {
    Calculator::with_resolvers(config::snapshot()).calculate(attributes)
}
