//! Example records written into empty collections on first open.

use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::{
    Animal, Collection, DiseaseOutbreak, HealthCheckup, RiskAssessment, VaccinationRecord, Visitor,
};
use crate::store::{KeyValueStore, StoreResult};

const EXAMPLE_ANIMALS: &str = r#"[
  {"id":"1","barcode":"PIG001234567","category":"Pig","breed":"Large White","dob":"2024-03","weight":85.5,"district":"Pune","state":"Maharashtra","registrationDate":"2025-01-15"},
  {"id":"2","barcode":"PIG001234568","category":"Pig","breed":"Duroc","dob":"2024-05","weight":72.3,"district":"Pune","state":"Maharashtra","registrationDate":"2025-02-10"},
  {"id":"3","barcode":"PLT001234569","category":"Poultry","breed":"Broiler","dob":"2025-01","weight":2.8,"district":"Nashik","state":"Maharashtra","registrationDate":"2025-03-05"}
]"#;

const EXAMPLE_VACCINATIONS: &str = r#"[
  {"id":"1","date":"2025-03-10","animalBarcode":"PIG001234567","animalCategory":"Pig","breed":"Large White","vaccineName":"Swine Fever Vaccine","doctorName":"Dr. Ramesh Kumar","nextDate":"2025-06-10"},
  {"id":"2","date":"2025-03-15","animalBarcode":"PLT001234569","animalCategory":"Poultry","breed":"Broiler","vaccineName":"Newcastle Disease Vaccine","doctorName":"Dr. Priya Sharma","nextDate":"2025-04-15"}
]"#;

const EXAMPLE_HEALTH_CHECKUPS: &str = r#"[
  {"id":"1","date":"2025-03-20","animalBarcode":"PIG001234567","animalCategory":"Pig","breed":"Large White","weight":85.5,"condition":"healthy","notes":"Animal in excellent health, normal activity levels"},
  {"id":"2","date":"2025-03-18","animalBarcode":"PIG001234568","animalCategory":"Pig","breed":"Duroc","weight":72.3,"condition":"healthy","notes":"Good appetite and normal behavior"}
]"#;

const EXAMPLE_OUTBREAKS: &str = r#"[
  {"id":"1","date":"2025-02-25","diseaseName":"Foot and Mouth Disease","animalBarcode":"PIG001234570","preventionMethod":"Immediate isolation, vaccination of herd, disinfection of premises","status":"Resolved"}
]"#;

const EXAMPLE_VISITORS: &str = r#"[
  {"id":"1","date":"2025-03-25","name":"Rajesh Patil","dob":"1985-06-15","mobile":"9876543210","address":"Village Khandala, Pune, Maharashtra","purpose":"Feed supplier delivery"},
  {"id":"2","date":"2025-03-24","name":"Dr. Suresh Deshmukh","mobile":"9823456789","address":"Animal Hospital, Nashik Road","purpose":"Routine health inspection"}
]"#;

const EXAMPLE_ASSESSMENTS: &str = r#"[
  {"id":"1","date":"2025-03-25","score":85,"answers":{"biosecurity_protocols":"Yes, strictly","visitor_management":"Always","animal_health":"All healthy","cleaning_schedule":"On schedule","feed_quality":"Excellent"}}
]"#;

/// Seed data for a collection, as the JSON array that gets stored.
pub fn example_json(collection: Collection) -> &'static str {
    match collection {
        Collection::Animals => EXAMPLE_ANIMALS,
        Collection::Vaccinations => EXAMPLE_VACCINATIONS,
        Collection::HealthCheckups => EXAMPLE_HEALTH_CHECKUPS,
        Collection::Outbreaks => EXAMPLE_OUTBREAKS,
        Collection::Visitors => EXAMPLE_VISITORS,
        Collection::Assessments => EXAMPLE_ASSESSMENTS,
    }
}

/// Write the example data into every collection whose key is absent.
///
/// Collections already present (even if empty) are left alone. Returns the
/// collections that were seeded.
pub fn seed_missing<S: KeyValueStore + ?Sized>(store: &mut S) -> StoreResult<Vec<Collection>> {
    let mut seeded = Vec::new();

    for collection in Collection::ALL {
        if store.contains(collection.key())? {
            continue;
        }
        let canonical = canonical_examples(collection)?;
        store.set(collection.key(), &canonical)?;
        seeded.push(collection);
    }

    if !seeded.is_empty() {
        info!(count = seeded.len(), "seeded example collections");
    }
    Ok(seeded)
}

/// Parse the example data through the typed models and re-serialize it, so
/// the seed is guaranteed to load.
fn canonical_examples(collection: Collection) -> StoreResult<String> {
    match collection {
        Collection::Animals => reserialize::<Animal>(collection),
        Collection::Vaccinations => reserialize::<VaccinationRecord>(collection),
        Collection::HealthCheckups => reserialize::<HealthCheckup>(collection),
        Collection::Outbreaks => reserialize::<DiseaseOutbreak>(collection),
        Collection::Visitors => reserialize::<Visitor>(collection),
        Collection::Assessments => reserialize::<RiskAssessment>(collection),
    }
}

fn reserialize<T: DeserializeOwned + serde::Serialize>(collection: Collection) -> StoreResult<String> {
    let records: Vec<T> = serde_json::from_str(example_json(collection))?;
    Ok(serde_json::to_string(&records)?)
}
