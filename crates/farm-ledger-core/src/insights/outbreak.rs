//! Outbreak escalation and counts.

use serde::Serialize;

use crate::models::{DiseaseOutbreak, HealthCheckup, OutbreakStatus};

/// The outbreak a checkup opens, if any.
///
/// A moderate or severe finding with a named disease opens one active
/// outbreak dated on the checkup. Repeated findings are not de-duplicated.
pub fn escalate(checkup: &HealthCheckup, id: String) -> Option<DiseaseOutbreak> {
    if !checkup.condition.is_escalating() {
        return None;
    }
    let disease = checkup.disease()?;

    Some(DiseaseOutbreak {
        id,
        date: checkup.date,
        disease_name: disease.to_string(),
        animal_barcode: checkup.animal_barcode.clone(),
        prevention_method: checkup.prevention.clone().unwrap_or_default(),
        status: OutbreakStatus::Active,
    })
}

/// Active and resolved outbreak counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutbreakSummary {
    pub active: usize,
    pub resolved: usize,
}

impl OutbreakSummary {
    pub fn compute(outbreaks: &[DiseaseOutbreak]) -> Self {
        let active = outbreaks.iter().filter(|o| o.is_active()).count();
        Self {
            active,
            resolved: outbreaks.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthCondition;
    use chrono::NaiveDate;

    fn checkup(condition: HealthCondition, disease: Option<&str>) -> HealthCheckup {
        HealthCheckup {
            id: "10".into(),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            animal_barcode: "PIG001234567".into(),
            animal_category: "Pig".into(),
            breed: "Large White".into(),
            weight: 84.0,
            condition,
            disease_name: disease.map(str::to_string),
            prevention: Some("Isolate pen 3".into()),
            notes: None,
        }
    }

    #[test]
    fn test_severe_with_disease_escalates() {
        let outbreak = escalate(&checkup(HealthCondition::Severe, Some("ASF")), "11".into()).unwrap();

        assert_eq!(outbreak.id, "11");
        assert_eq!(outbreak.disease_name, "ASF");
        assert_eq!(outbreak.animal_barcode, "PIG001234567");
        assert_eq!(outbreak.prevention_method, "Isolate pen 3");
        assert_eq!(outbreak.status, OutbreakStatus::Active);
        assert_eq!(outbreak.date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    }

    #[test]
    fn test_moderate_escalates() {
        assert!(escalate(&checkup(HealthCondition::Moderate, Some("ASF")), "11".into()).is_some());
    }

    #[test]
    fn test_mild_and_healthy_do_not_escalate() {
        assert!(escalate(&checkup(HealthCondition::Healthy, Some("ASF")), "11".into()).is_none());
        assert!(escalate(&checkup(HealthCondition::Mild, Some("ASF")), "11".into()).is_none());
    }

    #[test]
    fn test_blank_disease_does_not_escalate() {
        assert!(escalate(&checkup(HealthCondition::Severe, None), "11".into()).is_none());
        assert!(escalate(&checkup(HealthCondition::Severe, Some("  ")), "11".into()).is_none());
    }

    #[test]
    fn test_missing_prevention_is_empty() {
        let mut input = checkup(HealthCondition::Severe, Some("ASF"));
        input.prevention = None;
        assert_eq!(escalate(&input, "11".into()).unwrap().prevention_method, "");
    }

    #[test]
    fn test_summary() {
        let active = escalate(&checkup(HealthCondition::Severe, Some("ASF")), "1".into()).unwrap();
        let mut resolved = active.clone();
        resolved.status = OutbreakStatus::Resolved;

        let summary = OutbreakSummary::compute(&[active.clone(), resolved, active]);
        assert_eq!(summary, OutbreakSummary { active: 2, resolved: 1 });
    }
}
