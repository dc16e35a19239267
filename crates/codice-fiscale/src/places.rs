// Place-code tables: municipalities keyed by (name, province), countries by name
//
// The built-in table covers a handful of municipalities and countries. Full
// datasets are loaded from CSV with `PlaceTable::from_csv_reader` or
// `PlaceTable::from_path`.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use hashbrown::HashMap;
use serde::Deserialize;
use tracing::debug;

use codice_core::error::{CodiceError, Result};

/// Names recognized as the home country.
const HOME_COUNTRY_NAMES: &[&str] = &["ITALIA", "ITALY"];

/// Name of the home country used when a birthplace omits its country.
pub const HOME_COUNTRY: &str = "Italia";

/// Built-in municipalities: (name, province code, place code).
const MUNICIPALITIES: &[(&str, &str, &str)] = &[
    ("Abbadia Lariana", "LC", "A005"),
    ("Bari", "BA", "A662"),
    ("Bologna", "BO", "A944"),
    ("Cagliari", "CA", "B354"),
    ("Firenze", "FI", "D612"),
    ("Genova", "GE", "D969"),
    ("Lecco", "LC", "E507"),
    ("Milano", "MI", "F205"),
    ("Napoli", "NA", "F839"),
    ("Palermo", "PA", "G273"),
    ("Roma", "RM", "H501"),
    ("Torino", "TO", "L219"),
    ("Trieste", "TS", "L424"),
    ("Venezia", "VE", "L736"),
    ("Verona", "VR", "L781"),
];

/// Built-in foreign countries: (name, place code).
const COUNTRIES: &[(&str, &str)] = &[
    ("Albania", "Z100"),
    ("Argentina", "Z600"),
    ("Austria", "Z102"),
    ("Brasile", "Z602"),
    ("Cina", "Z210"),
    ("Francia", "Z110"),
    ("Germania", "Z112"),
    ("Marocco", "Z330"),
    ("Regno Unito", "Z114"),
    ("Romania", "Z129"),
    ("Spagna", "Z131"),
    ("Stati Uniti d'America", "Z404"),
    ("Svizzera", "Z133"),
];

static BUILTIN: LazyLock<PlaceTable> = LazyLock::new(|| {
    let mut table = PlaceTable::new();
    for &(name, province, code) in MUNICIPALITIES {
        table.insert_city(name, province, code);
    }
    for &(name, code) in COUNTRIES {
        table.insert_country(name, code);
    }
    debug!(
        cities = table.city_count(),
        countries = table.country_count(),
        "built-in place table initialized"
    );
    table
});

/// Normalize a lookup key: uppercase with runs of whitespace collapsed.
fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Width of a place code.
pub const PLACE_CODE_LEN: usize = 4;

/// Whether `code` has the place-code shape: one letter followed by three
/// letters or digits, uppercase.
pub fn is_place_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == PLACE_CODE_LEN
        && b[0].is_ascii_uppercase()
        && b[1..]
            .iter()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

/// Whether `country_name` denotes the home country.
pub fn is_home_country(country_name: &str) -> bool {
    let key = normalize_key(country_name);
    HOME_COUNTRY_NAMES.contains(&key.as_str())
}

/// Kind column of a place CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PlaceKind {
    City,
    Country,
}

/// One row of a place CSV file: `kind,name,province,code`.
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    kind: PlaceKind,
    name: String,
    #[serde(default)]
    province: Option<String>,
    code: String,
}

/// Lookup table from normalized place names to place codes.
///
/// Keys are compared case-insensitively with whitespace collapsed. Province
/// codes are not validated beyond the lookup itself.
#[derive(Debug, Clone, Default)]
pub struct PlaceTable {
    cities: HashMap<(String, String), String>,
    countries: HashMap<String, String>,
}

impl PlaceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared built-in table.
    pub fn builtin() -> &'static PlaceTable {
        &BUILTIN
    }

    /// Load a table from CSV with the header `kind,name,province,code`.
    ///
    /// `kind` is `city` (province required) or `country` (province empty).
    /// Codes must have the place-code shape after uppercasing.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (line, row) in csv_reader.deserialize::<PlaceRecord>().enumerate() {
            let record = row.map_err(|e| CodiceError::TableLoad(e.to_string()))?;
            if !is_place_code(&record.code.to_ascii_uppercase()) {
                return Err(CodiceError::TableLoad(format!(
                    "record {}: malformed place code '{}' for '{}'",
                    line + 1,
                    record.code,
                    record.name
                )));
            }
            match record.kind {
                PlaceKind::City => {
                    let province = record
                        .province
                        .filter(|p| !p.is_empty())
                        .ok_or_else(|| {
                            CodiceError::TableLoad(format!(
                                "record {}: city '{}' has no province",
                                line + 1,
                                record.name
                            ))
                        })?;
                    table.insert_city(&record.name, &province, &record.code);
                }
                PlaceKind::Country => table.insert_country(&record.name, &record.code),
            }
        }
        debug!(
            cities = table.city_count(),
            countries = table.country_count(),
            "place table loaded from csv"
        );
        Ok(table)
    }

    /// Load a CSV table from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| CodiceError::TableLoad(format!("{}: {e}", path.display())))?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Add or replace a municipality. The code is stored uppercased and is
    /// checked for shape only when a birthplace is encoded.
    pub fn insert_city(&mut self, name: &str, province: &str, code: &str) {
        self.cities.insert(
            (normalize_key(name), normalize_key(province)),
            code.trim().to_ascii_uppercase(),
        );
    }

    /// Add or replace a foreign country.
    pub fn insert_country(&mut self, name: &str, code: &str) {
        self.countries
            .insert(normalize_key(name), code.trim().to_ascii_uppercase());
    }

    /// Place code of a municipality.
    pub fn city(&self, name: &str, province: &str) -> Option<&str> {
        self.cities
            .get(&(normalize_key(name), normalize_key(province)))
            .map(String::as_str)
    }

    /// Place code of a foreign country.
    pub fn country(&self, name: &str) -> Option<&str> {
        self.countries.get(&normalize_key(name)).map(String::as_str)
    }

    /// Number of municipalities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of foreign countries.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }
}
