//! Typed collection access over a [`KeyValueStore`].
//!
//! Every write is read-modify-write of the whole collection: the JSON array
//! is loaded, changed in memory and stored back as one value. That keeps the
//! on-disk layout identical to the browser one at O(n) cost per write.

pub mod seed;

use serde_json::Value;
use tracing::debug;

use crate::models::{
    Animal, DiseaseOutbreak, HealthCheckup, Record, RiskAssessment, VaccinationRecord, Visitor,
};
use crate::store::{ensure_schema, KeyValueStore, StoreError, StoreResult};

/// Collection repository.
#[derive(Debug)]
pub struct Repository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    /// Wrap a store, bringing its layout up to date and optionally seeding
    /// absent collections with example data.
    pub fn open(mut store: S, seed_examples: bool) -> StoreResult<Self> {
        ensure_schema(&mut store)?;
        if seed_examples {
            seed::seed_missing(&mut store)?;
        }
        Ok(Self { store })
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// All records of a collection in insertion order; empty if the
    /// collection was never written.
    pub fn get_all<T: Record>(&self) -> StoreResult<Vec<T>> {
        match self.store.get(T::COLLECTION.key())? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn put_all<T: Record>(&mut self, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(T::COLLECTION.key(), &json)
    }

    /// Append one record. No uniqueness or schema checks.
    pub fn add<T: Record>(&mut self, record: &T) -> StoreResult<()> {
        let mut records = self.get_all::<T>()?;
        records.push(record.clone());
        self.put_all(&records)?;
        debug!(
            collection = T::COLLECTION.key(),
            id = record.id(),
            len = records.len(),
            "appended record"
        );
        Ok(())
    }

    /// Shallow-merge the fields of `patch` (a JSON object using the stored
    /// camelCase names) into the first record with `id`.
    ///
    /// Returns `false` without writing when no record has that id.
    pub fn update<T: Record>(&mut self, id: &str, patch: &Value) -> StoreResult<bool> {
        let Value::Object(fields) = patch else {
            return Err(StoreError::InvalidPatch);
        };

        let mut records = self.get_all::<T>()?;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        let mut merged = serde_json::to_value(&records[index])?;
        if let Value::Object(target) = &mut merged {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        records[index] = serde_json::from_value(merged)?;

        self.put_all(&records)?;
        debug!(collection = T::COLLECTION.key(), id, "updated record");
        Ok(true)
    }

    /// Remove every record with `id`. Returns how many were removed.
    pub fn delete<T: Record>(&mut self, id: &str) -> StoreResult<usize> {
        let mut records = self.get_all::<T>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = before - records.len();

        self.put_all(&records)?;
        debug!(collection = T::COLLECTION.key(), id, removed, "deleted records");
        Ok(removed)
    }

    /// First record with `id`.
    pub fn find_by_id<T: Record>(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.get_all::<T>()?.into_iter().find(|r| r.id() == id))
    }

    /// First animal whose barcode matches exactly.
    pub fn find_animal_by_barcode(&self, barcode: &str) -> StoreResult<Option<Animal>> {
        Ok(self
            .animals()?
            .into_iter()
            .find(|animal| animal.barcode == barcode))
    }

    // =========================================================================
    // Collection getters
    // =========================================================================

    pub fn animals(&self) -> StoreResult<Vec<Animal>> {
        self.get_all()
    }

    pub fn vaccinations(&self) -> StoreResult<Vec<VaccinationRecord>> {
        self.get_all()
    }

    pub fn health_checkups(&self) -> StoreResult<Vec<HealthCheckup>> {
        self.get_all()
    }

    pub fn outbreaks(&self) -> StoreResult<Vec<DiseaseOutbreak>> {
        self.get_all()
    }

    pub fn visitors(&self) -> StoreResult<Vec<Visitor>> {
        self.get_all()
    }

    pub fn assessments(&self) -> StoreResult<Vec<RiskAssessment>> {
        self.get_all()
    }
}
