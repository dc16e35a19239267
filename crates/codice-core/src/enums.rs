// Shared enums: Gender and the month-letter table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodiceError;

/// Gender of the subject. Females get 40 added to the day of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Accepted textual forms, as listed in `InvalidGender` messages.
    pub const ACCEPTED: &'static [&'static str] = &["male", "female"];

    /// Offset added to the day of birth in the birth field.
    pub fn day_offset(self) -> u32 {
        match self {
            Gender::Male => 0,
            Gender::Female => 40,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CodiceError;

    /// Parse `male`/`female` (or `m`/`f`), ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(CodiceError::InvalidGender(format!(
                "'{s}', possible values are {}",
                Gender::ACCEPTED.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Month letters
// ---------------------------------------------------------------------------

/// Letters assigned to January..December. The gaps (F, G, I-K, N, O, Q)
/// avoid letters easily confused with digits or each other.
pub const MONTH_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

/// Letter for a 1-based month number, `None` outside `1..=12`.
pub fn month_letter(month: u32) -> Option<char> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LETTERS.get(index).copied()
}
