// Process-wide resolver configuration
//
// One slot pair shared by the whole process, for embedders that prefer a
// global entry point over passing a `Calculator` around. Writes replace the
// slot (last write wins); each `calculate` call takes a snapshot at start,
// so a concurrent write affects only later calls.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::resolver::{CountryResolver, PlaceResolver, Resolvers};

static GLOBAL: RwLock<Resolvers> = RwLock::new(Resolvers::EMPTY);

/// Install (`Some`) or clear (`None`) the global domestic place resolver.
pub fn set_place_resolver(resolver: Option<Arc<dyn PlaceResolver>>) {
    info!(installed = resolver.is_some(), "global place resolver changed");
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set_place(resolver);
}

/// Install (`Some`) or clear (`None`) the global foreign country resolver.
pub fn set_country_resolver(resolver: Option<Arc<dyn CountryResolver>>) {
    info!(installed = resolver.is_some(), "global country resolver changed");
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set_country(resolver);
}

/// Clear both global resolvers, restoring table lookups.
pub fn reset() {
    info!("global resolvers reset");
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

/// Snapshot of the current global resolvers.
pub fn snapshot() -> Resolvers {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
