//! Vaccination schedule export.

use chrono::NaiveDate;
use serde::Serialize;

use super::escape_csv;
use crate::insights::DueStatus;
use crate::models::VaccinationRecord;

/// One upcoming dose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub vaccine_name: String,
    pub doctor_name: String,
    /// Date of the previous dose
    pub last_given: NaiveDate,
    pub next_date: NaiveDate,
    pub status: DueStatus,
}

/// Every vaccination's next dose, soonest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaccinationScheduleExport {
    /// Day the statuses were computed for
    pub generated_on: NaiveDate,
    pub rows: Vec<ScheduleRow>,
}

impl VaccinationScheduleExport {
    /// Classify each record against `today` and sort by next due date.
    pub fn build(records: &[VaccinationRecord], today: NaiveDate, window_days: u32) -> Self {
        let mut rows: Vec<ScheduleRow> = records
            .iter()
            .map(|record| ScheduleRow {
                animal_barcode: record.animal_barcode.clone(),
                animal_category: record.animal_category.clone(),
                breed: record.breed.clone(),
                vaccine_name: record.vaccine_name.clone(),
                doctor_name: record.doctor_name.clone(),
                last_given: record.date,
                next_date: record.next_date,
                status: DueStatus::classify(record, today, window_days),
            })
            .collect();
        // Stable, so records due the same day keep insertion order
        rows.sort_by_key(|row| row.next_date);

        Self {
            generated_on: today,
            rows,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("animal_barcode,animal_category,breed,vaccine_name,doctor_name,last_given,next_date,status\n");

        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                escape_csv(&row.animal_barcode),
                escape_csv(&row.animal_category),
                escape_csv(&row.breed),
                escape_csv(&row.vaccine_name),
                escape_csv(&row.doctor_name),
                row.last_given,
                row.next_date,
                row.status.label(),
            ));
        }

        csv
    }
}
