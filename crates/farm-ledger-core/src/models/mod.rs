//! Domain models for the farm-ledger system.

mod animal;
mod assessment;
mod checkup;
mod outbreak;
mod vaccination;
mod visitor;

pub use animal::*;
pub use assessment::*;
pub use checkup::*;
pub use outbreak::*;
pub use vaccination::*;
pub use visitor::*;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{FarmError, FarmResult};

/// The six named collections, each persisted as one JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Animals,
    Vaccinations,
    HealthCheckups,
    Outbreaks,
    Visitors,
    Assessments,
}

impl Collection {
    /// Every collection, in seeding order.
    pub const ALL: [Collection; 6] = [
        Collection::Animals,
        Collection::Vaccinations,
        Collection::HealthCheckups,
        Collection::Outbreaks,
        Collection::Visitors,
        Collection::Assessments,
    ];

    /// Storage key of the collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Animals => "animals",
            Collection::Vaccinations => "vaccinations",
            Collection::HealthCheckups => "healthCheckups",
            Collection::Outbreaks => "outbreaks",
            Collection::Visitors => "visitors",
            Collection::Assessments => "assessments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A record type stored in one of the collections.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection the record lives in.
    const COLLECTION: Collection;

    /// Record identifier (creation timestamp string).
    fn id(&self) -> &str;
}

/// Trimmed value of a required text field, or a missing-field error.
pub(crate) fn required(field: &'static str, value: &str) -> FarmResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FarmError::missing(field));
    }
    Ok(trimmed.to_string())
}

/// A present, finite weight. NaN and infinities serialize as `null`.
pub(crate) fn finite_weight(value: Option<f64>) -> FarmResult<f64> {
    let weight = value.ok_or(FarmError::missing("weight"))?;
    if !weight.is_finite() {
        return Err(FarmError::InvalidField {
            field: "weight",
            reason: "must be a finite number".into(),
        });
    }
    Ok(weight)
}

/// Trimmed optional text; blank collapses to `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        let keys: Vec<_> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "animals",
                "vaccinations",
                "healthCheckups",
                "outbreaks",
                "visitors",
                "assessments"
            ]
        );
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("breed", "  Duroc ").unwrap(), "Duroc");
        assert!(matches!(
            required("breed", "   "),
            Err(FarmError::MissingField { field: "breed" })
        ));
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" ASF ")), Some("ASF".into()));
    }
}
