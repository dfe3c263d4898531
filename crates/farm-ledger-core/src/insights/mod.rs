//! Values derived from the collections. Nothing here is persisted and every
//! function takes `today` explicitly.

pub mod cleaning;
pub mod food;
pub mod outbreak;
pub mod risk;
pub mod vaccination;

pub use cleaning::{CleaningChecklist, CleaningStep, CLEANING_STEPS};
pub use food::{schedule_for, FoodSchedule, Meal};
pub use outbreak::{escalate, OutbreakSummary};
pub use risk::{score_answers, RiskLevel, RiskQuestion, QUESTIONS};
pub use vaccination::{due_today, due_within, overdue, DueStatus, VaccinationSummary};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Animal, DiseaseOutbreak, RiskAssessment, VaccinationRecord};

/// Score of the most recently appended assessment.
pub fn latest_risk_score(assessments: &[RiskAssessment]) -> Option<u8> {
    assessments.last().map(|a| a.score)
}

/// Home page counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_animals: usize,
    pub vaccinations_due_today: usize,
    /// Active outbreaks
    pub active_alerts: usize,
    pub risk_score: Option<u8>,
}

pub fn dashboard(
    animals: &[Animal],
    vaccinations: &[VaccinationRecord],
    outbreaks: &[DiseaseOutbreak],
    assessments: &[RiskAssessment],
    today: NaiveDate,
) -> DashboardStats {
    DashboardStats {
        total_animals: animals.len(),
        vaccinations_due_today: due_today(vaccinations, today).len(),
        active_alerts: OutbreakSummary::compute(outbreaks).active,
        risk_score: latest_risk_score(assessments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn assessment(id: &str, score: u8) -> RiskAssessment {
        RiskAssessment {
            id: id.into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(),
            score,
            answers: BTreeMap::new(),
        }
    }

    #[test]
    fn test_latest_score_is_last_appended() {
        assert_eq!(latest_risk_score(&[]), None);
        assert_eq!(
            latest_risk_score(&[assessment("2", 40), assessment("1", 90)]),
            Some(90)
        );
    }

    #[test]
    fn test_empty_dashboard() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(dashboard(&[], &[], &[], &[], today), DashboardStats::default());
    }
}
