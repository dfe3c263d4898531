//! Disease outbreak models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Collection, Record};

/// Outbreak status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutbreakStatus {
    /// Still spreading or under treatment
    Active,
    /// Contained
    Resolved,
}

impl OutbreakStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OutbreakStatus::Active => "Active",
            OutbreakStatus::Resolved => "Resolved",
        }
    }
}

/// A disease event tied to one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseOutbreak {
    pub id: String,
    pub date: NaiveDate,
    pub disease_name: String,
    pub animal_barcode: String,
    pub prevention_method: String,
    pub status: OutbreakStatus,
}

impl Record for DiseaseOutbreak {
    const COLLECTION: Collection = Collection::Outbreaks;

    fn id(&self) -> &str {
        &self.id
    }
}

impl DiseaseOutbreak {
    pub fn is_active(&self) -> bool {
        self.status == OutbreakStatus::Active
    }
}
