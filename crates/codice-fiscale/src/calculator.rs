// Calculator: top-level entry point for fiscal code computation.
//
// Owns the place table and the resolver overrides and runs the pipeline
// validate -> place -> surname -> name -> birth -> check character.
// Any failing step aborts the computation; no partial code is returned.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use codice_core::error::Result;

use crate::attributes::{AttributeRecord, PersonalAttributes};
use crate::checksum::check_character;
use crate::encoder::{birthdate_part, birthplace_part, name_part, surname_part};
use crate::places::PlaceTable;
use crate::resolver::{CountryResolver, PlaceResolver, Resolvers};

/// A computed 16-character fiscal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FiscalCode(String);

impl FiscalCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The check character (last position).
    pub fn check_char(&self) -> char {
        self.0.chars().last().unwrap_or_default()
    }
}

impl fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FiscalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for FiscalCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Where the calculator reads its default place codes from.
#[derive(Debug, Clone)]
enum TableSource {
    Builtin,
    Owned(Arc<PlaceTable>),
}

/// Fiscal code calculator.
///
/// Resolver overrides are injected explicitly; the calculator itself holds
/// no global state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Calculator {
    table: TableSource,
    resolvers: Resolvers,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Calculator backed by the built-in place table.
    pub fn new() -> Self {
        Self {
            table: TableSource::Builtin,
            resolvers: Resolvers::default(),
        }
    }

    /// Calculator backed by a caller-supplied place table.
    pub fn with_table(table: PlaceTable) -> Self {
        Self {
            table: TableSource::Owned(Arc::new(table)),
            resolvers: Resolvers::default(),
        }
    }

    /// Calculator using the given resolver overrides.
    pub fn with_resolvers(resolvers: Resolvers) -> Self {
        Self {
            table: TableSource::Builtin,
            resolvers,
        }
    }

    /// The place table used when no override is installed.
    pub fn table(&self) -> &PlaceTable {
        match &self.table {
            TableSource::Builtin => PlaceTable::builtin(),
            TableSource::Owned(table) => table,
        }
    }

    pub fn resolvers(&self) -> &Resolvers {
        &self.resolvers
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Install a domestic place resolver, replacing any previous one.
    pub fn set_place_resolver(&mut self, resolver: impl PlaceResolver + 'static) {
        self.resolvers.set_place(Some(Arc::new(resolver)));
    }

    /// Install a foreign country resolver, replacing any previous one.
    pub fn set_country_resolver(&mut self, resolver: impl CountryResolver + 'static) {
        self.resolvers.set_country(Some(Arc::new(resolver)));
    }

    /// Remove both overrides, restoring table lookups.
    pub fn clear_resolvers(&mut self) {
        self.resolvers.clear();
    }

    // =========================================================================
    // Calculation
    // =========================================================================

    /// Compute the fiscal code for `attributes`.
    pub fn calculate(&self, attributes: &PersonalAttributes) -> Result<FiscalCode> {
        attributes.validate()?;

        let place = birthplace_part(&attributes.birthplace, &self.resolvers, self.table())?;

        let mut code = surname_part(&attributes.surname);
        code.push_str(&name_part(&attributes.name));
        code.push_str(&birthdate_part(attributes.birthdate, attributes.gender)?);
        code.push_str(&place);

        let check = check_character(&code)?;
        code.push(check);

        debug!(code = %code, "fiscal code computed");
        Ok(FiscalCode(code))
    }

    /// Validate an untyped record, then compute its fiscal code.
    pub fn calculate_record(&self, record: &AttributeRecord) -> Result<FiscalCode> {
        let attributes = record.validate()?;
        self.calculate(&attributes)
    }
}
