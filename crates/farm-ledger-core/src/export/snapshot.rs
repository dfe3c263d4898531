//! Full-farm JSON snapshot with an integrity checksum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::FarmResult;
use crate::models::{
    Animal, DiseaseOutbreak, HealthCheckup, RiskAssessment, VaccinationRecord, Visitor,
};
use crate::repository::Repository;
use crate::store::{read_schema_version, KeyValueStore};

/// Snapshot layout version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Every collection at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmSnapshot {
    /// Snapshot metadata
    pub metadata: SnapshotMetadata,
    /// Collection contents
    pub collections: SnapshotCollections,
}

/// Snapshot metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotMetadata {
    /// Snapshot layout version
    pub format_version: u32,
    /// Storage layout version the records were read from
    pub schema_version: u32,
    /// Export timestamp
    pub exported_at: String,
    /// Total records across all collections
    pub record_count: usize,
    /// SHA-256 (hex) of the serialized collections
    pub checksum: String,
}

/// Collection contents, keyed like the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCollections {
    pub animals: Vec<Animal>,
    pub vaccinations: Vec<VaccinationRecord>,
    pub health_checkups: Vec<HealthCheckup>,
    pub outbreaks: Vec<DiseaseOutbreak>,
    pub visitors: Vec<Visitor>,
    pub assessments: Vec<RiskAssessment>,
}

impl SnapshotCollections {
    fn record_count(&self) -> usize {
        self.animals.len()
            + self.vaccinations.len()
            + self.health_checkups.len()
            + self.outbreaks.len()
            + self.visitors.len()
            + self.assessments.len()
    }

    fn checksum(&self) -> Result<String, serde_json::Error> {
        Ok(hash_data(&serde_json::to_vec(self)?))
    }
}

impl FarmSnapshot {
    /// Read every collection from `repo`.
    pub fn capture<S: KeyValueStore>(
        repo: &Repository<S>,
        exported_at: DateTime<Utc>,
    ) -> FarmResult<Self> {
        let collections = SnapshotCollections {
            animals: repo.animals()?,
            vaccinations: repo.vaccinations()?,
            health_checkups: repo.health_checkups()?,
            outbreaks: repo.outbreaks()?,
            visitors: repo.visitors()?,
            assessments: repo.assessments()?,
        };
        Self::from_collections(collections, read_schema_version(repo.store())?, exported_at)
    }

    /// Build a snapshot from collections already in memory.
    pub fn from_collections(
        collections: SnapshotCollections,
        schema_version: u32,
        exported_at: DateTime<Utc>,
    ) -> FarmResult<Self> {
        let checksum = collections
            .checksum()
            .map_err(crate::store::StoreError::from)?;

        Ok(Self {
            metadata: SnapshotMetadata {
                format_version: SNAPSHOT_FORMAT_VERSION,
                schema_version,
                exported_at: exported_at.to_rfc3339(),
                record_count: collections.record_count(),
                checksum,
            },
            collections,
        })
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an exported snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the collections still match the recorded checksum and count.
    pub fn verify(&self) -> bool {
        match self.collections.checksum() {
            Ok(checksum) => {
                checksum == self.metadata.checksum
                    && self.collections.record_count() == self.metadata.record_count
            }
            Err(_) => false,
        }
    }
}

/// Compute SHA-256 hash of data.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 9, 30, 0).unwrap()
    }

    fn seeded_snapshot() -> FarmSnapshot {
        let repo = Repository::open(MemoryStore::new(), true).unwrap();
        FarmSnapshot::capture(&repo, exported_at()).unwrap()
    }

    #[test]
    fn test_capture_seeded() {
        let snapshot = seeded_snapshot();

        assert_eq!(snapshot.metadata.record_count, 11);
        assert_eq!(snapshot.metadata.schema_version, 1);
        assert_eq!(snapshot.metadata.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(snapshot.metadata.checksum.len(), 64);
        assert!(snapshot.verify());
    }

    #[test]
    fn test_json_keeps_checksum_valid() {
        let snapshot = seeded_snapshot();
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"healthCheckups\""));
        let parsed = FarmSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(parsed.verify());
    }

    #[test]
    fn test_tampering_detected() {
        let mut snapshot = seeded_snapshot();
        snapshot.collections.animals[0].weight = 120.0;
        assert!(!snapshot.verify());

        let mut snapshot = seeded_snapshot();
        snapshot.collections.visitors.pop();
        assert!(!snapshot.verify());
    }

    #[test]
    fn test_hash_data() {
        assert_eq!(
            hash_data(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
