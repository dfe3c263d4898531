//! Vaccination due-date filters.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::VaccinationRecord;

/// Where a vaccination's next dose stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueThisWeek,
    Scheduled,
}

impl DueStatus {
    /// Classify one record. `window_days` bounds "this week" inclusively.
    pub fn classify(record: &VaccinationRecord, today: NaiveDate, window_days: u32) -> Self {
        if record.is_overdue(today) {
            DueStatus::Overdue
        } else if record.is_due_on(today) {
            DueStatus::DueToday
        } else if record.is_due_within(today, window_days) {
            DueStatus::DueThisWeek
        } else {
            DueStatus::Scheduled
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DueStatus::Overdue => "overdue",
            DueStatus::DueToday => "due today",
            DueStatus::DueThisWeek => "due this week",
            DueStatus::Scheduled => "scheduled",
        }
    }
}

/// Records whose next dose is exactly today.
pub fn due_today(records: &[VaccinationRecord], today: NaiveDate) -> Vec<&VaccinationRecord> {
    records.iter().filter(|r| r.is_due_on(today)).collect()
}

/// Records whose next dose falls in `[today, today + window_days]`.
///
/// Today is included, so a dose due today shows up in both lists.
pub fn due_within(
    records: &[VaccinationRecord],
    today: NaiveDate,
    window_days: u32,
) -> Vec<&VaccinationRecord> {
    records
        .iter()
        .filter(|r| r.is_due_within(today, window_days))
        .collect()
}

/// Records whose next dose date has passed.
pub fn overdue(records: &[VaccinationRecord], today: NaiveDate) -> Vec<&VaccinationRecord> {
    records.iter().filter(|r| r.is_overdue(today)).collect()
}

/// Vaccination counts for the overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VaccinationSummary {
    pub total: usize,
    pub due_today: usize,
    pub due_this_week: usize,
    pub overdue: usize,
}

impl VaccinationSummary {
    pub fn compute(records: &[VaccinationRecord], today: NaiveDate, window_days: u32) -> Self {
        Self {
            total: records.len(),
            due_today: due_today(records, today).len(),
            due_this_week: due_within(records, today, window_days).len(),
            overdue: overdue(records, today).len(),
        }
    }
}
