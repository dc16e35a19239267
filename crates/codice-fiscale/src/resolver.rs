// Place and country resolution seams
//
// A resolver maps a birthplace description to a place code. The default
// resolvers read a `PlaceTable`; embedders install their own (for example
// backed by a database) through `Resolvers` or the global `config`.

use std::fmt;
use std::sync::Arc;

use crate::places::PlaceTable;

/// Resolves a domestic municipality to its place code.
pub trait PlaceResolver: Send + Sync {
    /// Returns `None` when the municipality is unknown.
    fn city_code(&self, city_name: &str, province_code: &str) -> Option<String>;
}

/// Resolves a foreign country to its place code.
pub trait CountryResolver: Send + Sync {
    /// Returns `None` when the country is unknown.
    fn country_code(&self, country_name: &str) -> Option<String>;
}

impl<F> PlaceResolver for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn city_code(&self, city_name: &str, province_code: &str) -> Option<String> {
        self(city_name, province_code)
    }
}

impl<F> CountryResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn country_code(&self, country_name: &str) -> Option<String> {
        self(country_name)
    }
}

impl PlaceResolver for PlaceTable {
    fn city_code(&self, city_name: &str, province_code: &str) -> Option<String> {
        self.city(city_name, province_code).map(str::to_owned)
    }
}

impl CountryResolver for PlaceTable {
    fn country_code(&self, country_name: &str) -> Option<String> {
        self.country(country_name).map(str::to_owned)
    }
}

/// Override slots for place and country resolution.
///
/// An empty slot falls back to the default table. Cloning is cheap: the
/// resolvers are shared.
#[derive(Clone, Default)]
pub struct Resolvers {
    pub(crate) place: Option<Arc<dyn PlaceResolver>>,
    pub(crate) country: Option<Arc<dyn CountryResolver>>,
}

impl Resolvers {
    /// Both slots empty.
    pub const EMPTY: Resolvers = Resolvers {
        place: None,
        country: None,
    };

    /// Install or clear the municipality override.
    pub fn set_place(&mut self, resolver: Option<Arc<dyn PlaceResolver>>) {
        self.place = resolver;
    }

    /// Install or clear the country override.
    pub fn set_country(&mut self, resolver: Option<Arc<dyn CountryResolver>>) {
        self.country = resolver;
    }

    /// Clear both slots, restoring default table lookups.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Whether a municipality override is installed.
    pub fn has_place_override(&self) -> bool {
        self.place.is_some()
    }

    /// Whether a country override is installed.
    pub fn has_country_override(&self) -> bool {
        self.country.is_some()
    }

    /// Resolve a municipality through the override, else `table`.
    pub fn city_code(
        &self,
        table: &PlaceTable,
        city_name: &str,
        province_code: &str,
    ) -> Option<String> {
        match &self.place {
            Some(resolver) => resolver.city_code(city_name, province_code),
            None => table.city_code(city_name, province_code),
        }
    }

    /// Resolve a country through the override, else `table`.
    pub fn country_code(&self, table: &PlaceTable, country_name: &str) -> Option<String> {
        match &self.country {
            Some(resolver) => resolver.country_code(country_name),
            None => table.country_code(country_name),
        }
    }
}

impl fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolvers")
            .field("place", &self.has_place_override())
            .field("country", &self.has_country_override())
            .finish()
    }
}
