// Field encoders: surname, name, birth (date + gender), birthplace
//
// Each encoder is a pure function of its inputs and returns a new string.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use codice_core::Gender;
use codice_core::character::{consonants, vowels};
use codice_core::enums::month_letter;
use codice_core::error::{CodiceError, Result};

use crate::attributes::Birthplace;
use crate::places::{PlaceTable, is_place_code};
use crate::resolver::Resolvers;

/// Width of the surname and name fields.
const NAME_FIELD_LEN: usize = 3;

/// Filler for names with fewer than three letters.
const PADDING: char = 'X';

/// Encode the surname field: consonants then vowels, truncated and padded
/// to three characters.
pub fn surname_part(surname: &str) -> String {
    consonants_then_vowels(surname)
}

/// Encode the given-name field.
///
/// With four or more consonants the field is the 1st, 3rd and 4th
/// consonant; otherwise the surname rule applies.
pub fn name_part(name: &str) -> String {
    let cons = consonants(name);
    if cons.len() >= 4 {
        return [cons[0], cons[2], cons[3]].iter().collect();
    }
    consonants_then_vowels(name)
}

fn consonants_then_vowels(text: &str) -> String {
    let mut field: String = consonants(text)
        .into_iter()
        .chain(vowels(text))
        .take(NAME_FIELD_LEN)
        .collect();
    while field.len() < NAME_FIELD_LEN {
        field.push(PADDING);
    }
    field
}

/// Encode the birth field: `YY`, month letter, `DD` (+40 for females).
///
/// Fails with `InvalidDate` for years before 0, which have no two-digit
/// form.
pub fn birthdate_part(birthdate: NaiveDate, gender: Gender) -> Result<String> {
    let year = birthdate.year();
    if year < 0 {
        return Err(CodiceError::InvalidDate(format!(
            "{birthdate}: year cannot be reduced to two digits"
        )));
    }
    let month = month_letter(birthdate.month())
        .ok_or_else(|| CodiceError::InvalidDate(birthdate.to_string()))?;
    let day = birthdate.day() + gender.day_offset();
    Ok(format!("{:02}{month}{day:02}", year % 100))
}

/// Encode the birthplace field through the resolvers.
///
/// Domestic birthplaces resolve by municipality and province, foreign ones
/// by country name. The resolved code is trimmed and uppercased and must be
/// one letter followed by three letters or digits. An incomplete domestic
/// birthplace, an unresolved name or a malformed code fails with
/// `PlaceNotFound`.
pub fn birthplace_part(
    birthplace: &Birthplace,
    resolvers: &Resolvers,
    table: &PlaceTable,
) -> Result<String> {
    let (code, description) = if birthplace.is_domestic() {
        let city = birthplace.city_name.as_deref().unwrap_or_default();
        let province = birthplace.province_code.as_deref().unwrap_or_default();
        let description = format!("city '{city}' ({province})");
        if city.trim().is_empty() || province.trim().is_empty() {
            (None, description)
        } else {
            (resolvers.city_code(table, city, province), description)
        }
    } else {
        let country = birthplace.country();
        (
            resolvers.country_code(table, country),
            format!("country '{country}'"),
        )
    };

    match code.map(|c| c.trim().to_ascii_uppercase()) {
        Some(code) if is_place_code(&code) => Ok(code),
        Some(code) if !code.is_empty() => {
            warn!(place = %description, code = %code, "malformed place code");
            Err(CodiceError::PlaceNotFound(format!(
                "{description}: malformed code '{code}'"
            )))
        }
        _ => {
            warn!(place = %description, "birthplace not resolved");
            Err(CodiceError::PlaceNotFound(description))
        }
    }
}
