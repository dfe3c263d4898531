//! Health checkup models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{finite_weight, optional, required, Collection, Record};
use crate::error::{FarmError, FarmResult};

/// Observed health condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCondition {
    Healthy,
    Mild,
    Moderate,
    Severe,
}

impl HealthCondition {
    /// Moderate and severe findings open an outbreak when a disease is named.
    pub fn is_escalating(self) -> bool {
        matches!(self, HealthCondition::Moderate | HealthCondition::Severe)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthCondition::Healthy => "healthy",
            HealthCondition::Mild => "mild",
            HealthCondition::Moderate => "moderate",
            HealthCondition::Severe => "severe",
        }
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthCondition {
    type Err = FarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "healthy" => Ok(HealthCondition::Healthy),
            "mild" => Ok(HealthCondition::Mild),
            "moderate" => Ok(HealthCondition::Moderate),
            "severe" => Ok(HealthCondition::Severe),
            "" => Err(FarmError::missing("condition")),
            other => Err(FarmError::InvalidAnswer {
                question: "condition".into(),
                answer: other.into(),
            }),
        }
    }
}

/// A health inspection of one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckup {
    pub id: String,
    pub date: NaiveDate,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    /// Weight in kg at the checkup
    pub weight: f64,
    pub condition: HealthCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevention: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for HealthCheckup {
    const COLLECTION: Collection = Collection::HealthCheckups;

    fn id(&self) -> &str {
        &self.id
    }
}

impl HealthCheckup {
    /// Disease name if one was recorded (blank counts as none).
    pub fn disease(&self) -> Option<&str> {
        self.disease_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Checkup form input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckup {
    /// Checkup date; defaults to today
    pub date: Option<NaiveDate>,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub weight: Option<f64>,
    pub condition: HealthCondition,
    pub disease_name: Option<String>,
    pub prevention: Option<String>,
    pub notes: Option<String>,
}

impl NewCheckup {
    /// Build the record once every required field is present.
    pub(crate) fn into_record(self, id: String, today: NaiveDate) -> FarmResult<HealthCheckup> {
        Ok(HealthCheckup {
            id,
            date: self.date.unwrap_or(today),
            animal_barcode: required("animal_barcode", &self.animal_barcode)?,
            animal_category: required("animal_category", &self.animal_category)?,
            breed: required("breed", &self.breed)?,
            weight: finite_weight(self.weight)?,
            condition: self.condition,
            disease_name: optional(self.disease_name.as_deref()),
            prevention: optional(self.prevention.as_deref()),
            notes: optional(self.notes.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(condition: HealthCondition, disease: Option<&str>) -> NewCheckup {
        NewCheckup {
            date: None,
            animal_barcode: "PIG001234567".into(),
            animal_category: "Pig".into(),
            breed: "Large White".into(),
            weight: Some(85.5),
            condition,
            disease_name: disease.map(str::to_string),
            prevention: None,
            notes: None,
        }
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!("Severe".parse::<HealthCondition>().unwrap(), HealthCondition::Severe);
        assert_eq!(" healthy ".parse::<HealthCondition>().unwrap(), HealthCondition::Healthy);
        assert!(matches!(
            "".parse::<HealthCondition>(),
            Err(FarmError::MissingField { field: "condition" })
        ));
        assert!("critical".parse::<HealthCondition>().is_err());
    }

    #[test]
    fn test_escalating_conditions() {
        assert!(!HealthCondition::Healthy.is_escalating());
        assert!(!HealthCondition::Mild.is_escalating());
        assert!(HealthCondition::Moderate.is_escalating());
        assert!(HealthCondition::Severe.is_escalating());
    }

    #[test]
    fn test_blank_disease_is_none() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let checkup = form(HealthCondition::Mild, Some("   "))
            .into_record("1".into(), today)
            .unwrap();

        assert_eq!(checkup.disease_name, None);
        assert_eq!(checkup.disease(), None);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let checkup = form(HealthCondition::Healthy, None)
            .into_record("1".into(), today)
            .unwrap();

        let json = serde_json::to_string(&checkup).unwrap();
        assert!(json.contains(r#""condition":"healthy""#));
        assert!(!json.contains("diseaseName"));
    }

    #[test]
    fn test_missing_weight() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let mut input = form(HealthCondition::Healthy, None);
        input.weight = None;

        assert!(matches!(
            input.into_record("1".into(), today),
            Err(FarmError::MissingField { field: "weight" })
        ));
    }

    #[test]
    fn test_non_finite_weight() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let mut input = form(HealthCondition::Healthy, None);
        input.weight = Some(f64::NAN);

        assert!(matches!(
            input.into_record("1".into(), today),
            Err(FarmError::InvalidField { field: "weight", .. })
        ));
    }
}
