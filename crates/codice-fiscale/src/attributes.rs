// Input records and their validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use codice_core::Gender;
use codice_core::error::{CodiceError, Result};

use crate::places::{HOME_COUNTRY, is_home_country};

/// Where the subject was born.
///
/// A missing `country_name` means the home country, in which case
/// `city_name` and `province_code` identify the municipality. They are not
/// checked here: an incomplete birthplace fails later with `PlaceNotFound`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthplace {
    pub country_name: Option<String>,
    pub city_name: Option<String>,
    pub province_code: Option<String>,
}

impl Birthplace {
    /// A municipality in the home country.
    pub fn domestic(city_name: impl Into<String>, province_code: impl Into<String>) -> Self {
        Self {
            country_name: None,
            city_name: Some(city_name.into()),
            province_code: Some(province_code.into()),
        }
    }

    /// A foreign country.
    pub fn foreign(country_name: impl Into<String>) -> Self {
        Self {
            country_name: Some(country_name.into()),
            city_name: None,
            province_code: None,
        }
    }

    /// Country name, defaulting to the home country.
    pub fn country(&self) -> &str {
        self.country_name.as_deref().unwrap_or(HOME_COUNTRY)
    }

    /// Whether the birthplace is resolved by municipality.
    pub fn is_domestic(&self) -> bool {
        is_home_country(self.country())
    }
}

/// Typed personal attributes consumed by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalAttributes {
    pub name: String,
    pub surname: String,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    #[serde(flatten)]
    pub birthplace: Birthplace,
}

impl PersonalAttributes {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        gender: Gender,
        birthdate: NaiveDate,
        birthplace: Birthplace,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            gender,
            birthdate,
            birthplace,
        }
    }

    /// Check that the free-text fields are present, `name` first.
    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))?;
        require_text("surname", Some(&self.surname))?;
        Ok(())
    }
}

/// Untyped attributes as received from a form or a JSON document.
///
/// Every field is optional text; [`AttributeRecord::validate`] turns it into
/// [`PersonalAttributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<String>,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    pub birthdate: Option<String>,
    pub country_name: Option<String>,
    pub city_name: Option<String>,
    pub province_code: Option<String>,
}

impl AttributeRecord {
    /// Validate and convert into typed attributes.
    ///
    /// Missing fields are reported first, in the order `name`, `surname`,
    /// `gender`, `birthdate`; then the date is parsed, then the gender.
    /// The birthplace is passed through unchecked.
    pub fn validate(&self) -> Result<PersonalAttributes> {
        let name = require_text("name", self.name.as_deref())?;
        let surname = require_text("surname", self.surname.as_deref())?;
        let gender = require_text("gender", self.gender.as_deref())?;
        let birthdate = require_text("birthdate", self.birthdate.as_deref())?;

        let birthdate = parse_birthdate(birthdate)?;
        let gender = gender.parse::<Gender>()?;

        Ok(PersonalAttributes {
            name: name.to_owned(),
            surname: surname.to_owned(),
            gender,
            birthdate,
            birthplace: Birthplace {
                country_name: self.country_name.clone(),
                city_name: self.city_name.clone(),
                province_code: self.province_code.clone(),
            },
        })
    }
}

fn require_text<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CodiceError::MissingField(field)),
    }
}

fn parse_birthdate(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| CodiceError::InvalidDate(format!("{text}: {e}")))
}
