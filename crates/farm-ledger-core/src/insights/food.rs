//! Daily feeding schedules.

use serde::Serialize;

use crate::models::{AnimalCategory, HealthCheckup};

const SUPPLEMENT_SUFFIX: &str = " + Supplements";

/// One feeding slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    /// Time of day ("06:00")
    pub time: &'static str,
    pub food: String,
}

/// The three meals of a day for one animal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodSchedule {
    pub barcode: String,
    pub category: AnimalCategory,
    /// Whether diet supplements were added because of a recorded disease
    pub supplemented: bool,
    pub meals: Vec<Meal>,
}

fn base_meals(category: AnimalCategory) -> [(&'static str, &'static str); 3] {
    match category {
        AnimalCategory::Pig => [
            ("06:00", "Grower pellets 1.5 kg"),
            ("12:00", "Maize and soybean meal 1 kg"),
            ("18:00", "Grower pellets 1.5 kg"),
        ],
        AnimalCategory::Poultry => [
            ("06:00", "Starter crumble 50 g"),
            ("12:00", "Grain mix 40 g"),
            ("17:00", "Layer mash 50 g"),
        ],
    }
}

/// Build the feeding schedule for `barcode`.
///
/// Every meal gets supplements when any checkup of the animal named a disease.
pub fn schedule_for(
    barcode: &str,
    category: AnimalCategory,
    checkups: &[HealthCheckup],
) -> FoodSchedule {
    let supplemented = checkups
        .iter()
        .any(|c| c.animal_barcode == barcode && c.disease().is_some());

    let meals = base_meals(category)
        .into_iter()
        .map(|(time, food)| Meal {
            time,
            food: if supplemented {
                format!("{food}{SUPPLEMENT_SUFFIX}")
            } else {
                food.to_string()
            },
        })
        .collect();

    FoodSchedule {
        barcode: barcode.to_string(),
        category,
        supplemented,
        meals,
    }
}
