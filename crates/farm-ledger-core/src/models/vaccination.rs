//! Vaccination models.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{required, Collection, Record};
use crate::error::FarmResult;

/// A vaccination given to an animal, with the date the next dose is due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub id: String,
    /// Date the vaccine was given
    pub date: NaiveDate,
    /// Barcode of the animal (not checked against registrations)
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub vaccine_name: String,
    pub doctor_name: String,
    /// Date the next dose is due
    pub next_date: NaiveDate,
}

impl Record for VaccinationRecord {
    const COLLECTION: Collection = Collection::Vaccinations;

    fn id(&self) -> &str {
        &self.id
    }
}

impl VaccinationRecord {
    /// Due date of the next dose for a vaccination given on `date`.
    ///
    /// Month arithmetic clamps to the end of shorter months
    /// (Nov 30 + 3 months = Feb 28/29).
    pub fn next_due(date: NaiveDate, interval_months: u32) -> NaiveDate {
        date.checked_add_months(Months::new(interval_months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether the next dose falls exactly on `day`.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.next_date == day
    }

    /// Whether the next dose falls within `[today, today + window_days]`.
    pub fn is_due_within(&self, today: NaiveDate, window_days: u32) -> bool {
        let end = today
            .checked_add_days(chrono::Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MAX);
        self.next_date >= today && self.next_date <= end
    }

    /// Whether the next dose date has already passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.next_date < today
    }
}

/// Vaccination form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVaccination {
    /// Date given; defaults to today
    pub date: Option<NaiveDate>,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub vaccine_name: String,
    pub doctor_name: String,
}

impl NewVaccination {
    /// Build the record once every required field is present.
    pub(crate) fn into_record(
        self,
        id: String,
        today: NaiveDate,
        interval_months: u32,
    ) -> FarmResult<VaccinationRecord> {
        let date = self.date.unwrap_or(today);
        Ok(VaccinationRecord {
            id,
            date,
            animal_barcode: required("animal_barcode", &self.animal_barcode)?,
            animal_category: required("animal_category", &self.animal_category)?,
            breed: required("breed", &self.breed)?,
            vaccine_name: required("vaccine_name", &self.vaccine_name)?,
            doctor_name: required("doctor_name", &self.doctor_name)?,
            next_date: VaccinationRecord::next_due(date, interval_months),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarmError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_due(next_date: NaiveDate) -> VaccinationRecord {
        VaccinationRecord {
            id: "1".into(),
            date: date(2025, 3, 10),
            animal_barcode: "PIG001234567".into(),
            animal_category: "Pig".into(),
            breed: "Large White".into(),
            vaccine_name: "Swine Fever Vaccine".into(),
            doctor_name: "Dr. Ramesh Kumar".into(),
            next_date,
        }
    }

    #[test]
    fn test_next_due_three_months() {
        assert_eq!(VaccinationRecord::next_due(date(2025, 3, 10), 3), date(2025, 6, 10));
        assert_eq!(VaccinationRecord::next_due(date(2025, 11, 15), 3), date(2026, 2, 15));
    }

    #[test]
    fn test_next_due_clamps_month_end() {
        assert_eq!(VaccinationRecord::next_due(date(2025, 11, 30), 3), date(2026, 2, 28));
    }

    #[test]
    fn test_due_on_exact_day_only() {
        let today = date(2025, 6, 10);
        assert!(record_due(today).is_due_on(today));
        assert!(!record_due(date(2025, 6, 11)).is_due_on(today));
    }

    #[test]
    fn test_due_within_inclusive_bounds() {
        let today = date(2025, 6, 10);
        assert!(record_due(today).is_due_within(today, 7));
        assert!(record_due(date(2025, 6, 17)).is_due_within(today, 7));
        assert!(!record_due(date(2025, 6, 18)).is_due_within(today, 7));
        assert!(!record_due(date(2025, 6, 9)).is_due_within(today, 7));
    }

    #[test]
    fn test_overdue() {
        let today = date(2025, 6, 10);
        assert!(record_due(date(2025, 6, 9)).is_overdue(today));
        assert!(!record_due(today).is_overdue(today));
    }

    #[test]
    fn test_into_record_defaults_date_to_today() {
        let form = NewVaccination {
            date: None,
            animal_barcode: "PLT001234569".into(),
            animal_category: "Poultry".into(),
            breed: "Broiler".into(),
            vaccine_name: "Newcastle Disease Vaccine".into(),
            doctor_name: "Dr. Priya Sharma".into(),
        };

        let record = form.into_record("7".into(), date(2025, 1, 31), 3).unwrap();
        assert_eq!(record.date, date(2025, 1, 31));
        assert_eq!(record.next_date, date(2025, 4, 30));
    }

    #[test]
    fn test_into_record_requires_vaccine() {
        let form = NewVaccination {
            animal_barcode: "PLT001234569".into(),
            animal_category: "Poultry".into(),
            breed: "Broiler".into(),
            doctor_name: "Dr. Priya Sharma".into(),
            ..Default::default()
        };

        assert!(matches!(
            form.into_record("7".into(), date(2025, 1, 31), 3),
            Err(FarmError::MissingField { field: "vaccine_name" })
        ));
    }
}
