// Error taxonomy shared by every stage of the calculation

/// Error type for fiscal code calculation.
///
/// Every stage fails synchronously with one of these variants and aborts
/// the whole computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodiceError {
    /// A required attribute (`name`, `surname`, `gender`, `birthdate`) is
    /// absent or empty.
    #[error("missing {0} parameter")]
    MissingField(&'static str),

    /// Gender is not one of the recognized values.
    #[error("invalid gender {0}")]
    InvalidGender(String),

    /// Birthdate is malformed or cannot be encoded.
    #[error("invalid birthdate: {0}")]
    InvalidDate(String),

    /// A character outside the code alphabet reached the checksum.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The birthplace did not resolve to a place code.
    #[error("city/country code not found for {0}, misspelled?")]
    PlaceNotFound(String),

    /// A place table could not be read or parsed.
    #[error("failed to load place table: {0}")]
    TableLoad(String),
}

pub type Result<T> = std::result::Result<T, CodiceError>;
