//! Persisted layout versioning.
//!
//! The version lives under its own key next to the collections. Stores
//! written before versioning existed (the browser layout) have no version key
//! and count as version 0.

use tracing::{debug, info};

use super::{KeyValueStore, StoreError, StoreResult};

/// The current persisted layout version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key holding the layout version.
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Bring the store up to [`CURRENT_SCHEMA_VERSION`].
///
/// Fails if the store was written by a newer layout than this build knows.
pub fn ensure_schema<S: KeyValueStore + ?Sized>(store: &mut S) -> StoreResult<u32> {
    let version = read_schema_version(store)?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if version < CURRENT_SCHEMA_VERSION {
        run_migrations(store, version)?;
    } else {
        debug!(version, "schema up to date");
    }

    Ok(CURRENT_SCHEMA_VERSION)
}

/// Read the stored layout version, 0 when absent.
pub fn read_schema_version<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<u32> {
    match store.get(SCHEMA_VERSION_KEY)? {
        None => Ok(0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidSchemaVersion(value)),
    }
}

fn set_schema_version<S: KeyValueStore + ?Sized>(store: &mut S, version: u32) -> StoreResult<()> {
    store.set(SCHEMA_VERSION_KEY, &version.to_string())
}

fn run_migrations<S: KeyValueStore + ?Sized>(store: &mut S, from_version: u32) -> StoreResult<()> {
    let mut current = from_version;

    while current < CURRENT_SCHEMA_VERSION {
        current += 1;
        run_migration(store, current)?;
    }

    info!(from = from_version, to = CURRENT_SCHEMA_VERSION, "migrated stored layout");
    Ok(())
}

fn run_migration<S: KeyValueStore + ?Sized>(store: &mut S, version: u32) -> StoreResult<()> {
    match version {
        1 => migrate_v1(store),
        _ => Err(StoreError::UnsupportedSchemaVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        }),
    }
}

/// Version 1 keeps the unversioned browser layout as-is (camelCase JSON
/// arrays under the six collection keys) and only stamps the version.
fn migrate_v1<S: KeyValueStore + ?Sized>(store: &mut S) -> StoreResult<()> {
    set_schema_version(store, 1)
}
