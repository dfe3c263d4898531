//! Risk assessment models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Collection, Record};

/// One completed biosecurity questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub date: NaiveDate,
    /// Score in 0..=100, higher is safer
    pub score: u8,
    /// Question id -> selected option text
    pub answers: BTreeMap<String, String>,
}

impl Record for RiskAssessment {
    const COLLECTION: Collection = Collection::Assessments;

    fn id(&self) -> &str {
        &self.id
    }
}
