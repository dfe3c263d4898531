//! Animal models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{finite_weight, required, Collection, Record};
use crate::error::FarmResult;

/// A registered animal. The barcode is the join key every other record uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Creation timestamp id
    pub id: String,
    /// Generated barcode (e.g. "PIG1742457600000123")
    pub barcode: String,
    /// Category label ("Pig" or "Poultry")
    pub category: String,
    /// Breed
    pub breed: String,
    /// Date of birth as year-month ("2024-03")
    pub dob: String,
    /// Weight in kg
    pub weight: f64,
    /// District
    pub district: String,
    /// State
    pub state: String,
    /// Registration date
    pub registration_date: NaiveDate,
}

impl Record for Animal {
    const COLLECTION: Collection = Collection::Animals;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Animal {
    /// Parsed category.
    pub fn kind(&self) -> AnimalCategory {
        AnimalCategory::from_label(&self.category)
    }
}

/// The two species the farm keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalCategory {
    Pig,
    Poultry,
}

impl AnimalCategory {
    /// Parse a category label. "pig" in any case is a pig; anything else is
    /// treated as poultry.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("pig") {
            AnimalCategory::Pig
        } else {
            AnimalCategory::Poultry
        }
    }

    /// Barcode prefix for the category.
    pub fn barcode_prefix(self) -> &'static str {
        match self {
            AnimalCategory::Pig => "PIG",
            AnimalCategory::Poultry => "PLT",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            AnimalCategory::Pig => "Pig",
            AnimalCategory::Poultry => "Poultry",
        }
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAnimal {
    pub category: String,
    pub breed: String,
    /// Year-month of birth ("2024-03")
    pub dob: String,
    pub weight: Option<f64>,
    pub district: String,
    pub state: String,
}

/// Registration input with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidAnimal {
    pub category: AnimalCategory,
    pub breed: String,
    pub dob: String,
    pub weight: f64,
    pub district: String,
    pub state: String,
}

impl NewAnimal {
    /// Check that every required field is present.
    pub(crate) fn validate(&self) -> FarmResult<ValidAnimal> {
        let category = required("category", &self.category)?;
        Ok(ValidAnimal {
            category: AnimalCategory::from_label(&category),
            breed: required("breed", &self.breed)?,
            dob: required("dob", &self.dob)?,
            weight: finite_weight(self.weight)?,
            district: required("district", &self.district)?,
            state: required("state", &self.state)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarmError;

    fn complete_form() -> NewAnimal {
        NewAnimal {
            category: "Pig".into(),
            breed: "Large White".into(),
            dob: "2024-03".into(),
            weight: Some(85.5),
            district: "Pune".into(),
            state: "Maharashtra".into(),
        }
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(AnimalCategory::from_label("Pig"), AnimalCategory::Pig);
        assert_eq!(AnimalCategory::from_label("pig"), AnimalCategory::Pig);
        assert_eq!(AnimalCategory::from_label("Poultry"), AnimalCategory::Poultry);
        assert_eq!(AnimalCategory::from_label("goat"), AnimalCategory::Poultry);
    }

    #[test]
    fn test_barcode_prefix() {
        assert_eq!(AnimalCategory::Pig.barcode_prefix(), "PIG");
        assert_eq!(AnimalCategory::Poultry.barcode_prefix(), "PLT");
    }

    #[test]
    fn test_validate_non_finite_weight() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut form = complete_form();
            form.weight = Some(weight);
            assert!(matches!(
                form.validate(),
                Err(FarmError::InvalidField { field: "weight", .. })
            ));
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let valid = complete_form().validate().unwrap();
        assert_eq!(valid.category, AnimalCategory::Pig);
        assert_eq!(valid.weight, 85.5);
    }

    #[test]
    fn test_validate_missing_weight() {
        let mut form = complete_form();
        form.weight = None;
        assert!(matches!(
            form.validate(),
            Err(FarmError::MissingField { field: "weight" })
        ));
    }

    #[test]
    fn test_validate_blank_district() {
        let mut form = complete_form();
        form.district = " ".into();
        assert!(matches!(
            form.validate(),
            Err(FarmError::MissingField { field: "district" })
        ));
    }

    #[test]
    fn test_serialized_layout_is_camel_case() {
        let animal = Animal {
            id: "1".into(),
            barcode: "PIG001234567".into(),
            category: "Pig".into(),
            breed: "Large White".into(),
            dob: "2024-03".into(),
            weight: 85.5,
            district: "Pune".into(),
            state: "Maharashtra".into(),
            registration_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        };

        let json = serde_json::to_string(&animal).unwrap();
        assert!(json.contains(r#""registrationDate":"2025-01-15""#));
        assert_eq!(animal.kind(), AnimalCategory::Pig);
    }
}
