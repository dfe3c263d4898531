//! Farm-Ledger Core Library
//!
//! Local-first livestock records: registration, vaccinations, health checkups,
//! disease outbreaks, visitor log and a biosecurity risk questionnaire.
//!
//! # Architecture
//!
//! ```text
//!   Form input (registration, vaccination, checkup, visitor, questionnaire)
//!                                   │
//!                      validate required fields
//!                                   │
//!                  ┌────────────────▼────────────────┐
//!                  │  FarmLedger: id + date stamp    │
//!                  │  checkup ─► outbreak escalation │
//!                  └────────────────┬────────────────┘
//!                                   │
//!                 Repository: read-modify-write of one
//!                  JSON array per named collection
//!                                   │
//!                     KeyValueStore (SQLite / memory)
//!                                   │
//!             ┌─────────────────────┼─────────────────────┐
//!             ▼                     ▼                     ▼
//!      Due vaccinations      Dashboard / risk        Snapshot and
//!       food schedules           level            schedule export
//! ```
//!
//! # Modules
//!
//! - [`store`]: key-value backends, capacity ceiling and layout versioning
//! - [`models`]: record types and form inputs
//! - [`repository`]: typed collection access and example seeding
//! - [`barcode`]: barcode ids, similar-barcode suggestions, Code 128 rendering
//! - [`insights`]: due dates, outbreak escalation, risk scoring, food and cleaning
//! - [`ledger`]: the application service
//! - [`export`]: JSON snapshot and vaccination schedule CSV

pub mod barcode;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{FarmError, FarmResult};
pub use ledger::{AnimalRecords, CheckupOutcome, DynStore, FarmLedger};
pub use models::{
    Animal, AnimalCategory, DiseaseOutbreak, HealthCheckup, HealthCondition, NewAnimal,
    NewCheckup, NewVaccination, NewVisitor, OutbreakStatus, RiskAssessment, VaccinationRecord,
    Visitor,
};
pub use repository::Repository;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use config::StorageBackend;
use logging::Verbosity;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FarmLedgerError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<FarmError> for FarmLedgerError {
    fn from(e: FarmError) -> Self {
        match e {
            FarmError::AnimalNotFound {
                ref barcode,
                ref suggestions,
            } if !suggestions.is_empty() => FarmLedgerError::NotFound(format!(
                "animal {} (did you mean {}?)",
                barcode,
                suggestions.join(", ")
            )),
            e if e.is_not_found() => FarmLedgerError::NotFound(e.to_string()),
            e if e.is_validation_error() => FarmLedgerError::InvalidInput(e.to_string()),
            FarmError::Barcode(e) => FarmLedgerError::InvalidInput(e.to_string()),
            e @ (FarmError::ConfigLoad(_) | FarmError::ConfigValidation { .. }) => {
                FarmLedgerError::ConfigError(e.to_string())
            }
            e => FarmLedgerError::StorageError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for FarmLedgerError {
    fn from(e: serde_json::Error) -> Self {
        FarmLedgerError::StorageError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for FarmLedgerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        FarmLedgerError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a ledger database at the given path.
#[uniffi::export]
pub fn open_ledger(path: String) -> Result<Arc<FarmLedgerCore>, FarmLedgerError> {
    let mut config = Config::default();
    config.storage.database_path = Some(PathBuf::from(path));
    FarmLedgerCore::open(&config)
}

/// Create an in-memory ledger (for testing).
#[uniffi::export]
pub fn open_ledger_in_memory(seed_examples: bool) -> Result<Arc<FarmLedgerCore>, FarmLedgerError> {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    config.storage.seed_examples = seed_examples;
    FarmLedgerCore::open(&config)
}

/// Open the ledger described by a config file (defaults apply when absent).
#[uniffi::export]
pub fn open_ledger_with_config(
    config_path: Option<String>,
) -> Result<Arc<FarmLedgerCore>, FarmLedgerError> {
    let config = Config::load_from(config_path.map(PathBuf::from))?;
    FarmLedgerCore::open(&config)
}

/// Install the log subscriber. Later calls are ignored.
#[uniffi::export]
pub fn enable_logging(verbose: bool) {
    logging::init_logging(if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe ledger wrapper for FFI.
#[derive(uniffi::Object)]
pub struct FarmLedgerCore {
    ledger: Arc<Mutex<FarmLedger<DynStore, SystemClock>>>,
}

impl FarmLedgerCore {
    fn open(config: &Config) -> Result<Arc<Self>, FarmLedgerError> {
        let ledger = FarmLedger::open(config)?;
        Ok(Arc::new(Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }))
    }
}

#[uniffi::export]
impl FarmLedgerCore {
    // =========================================================================
    // Animal Operations
    // =========================================================================

    /// Register an animal; returns it with its barcode picture.
    pub fn register_animal(
        &self,
        form: FfiNewAnimal,
    ) -> Result<FfiRegisteredAnimal, FarmLedgerError> {
        let mut ledger = self.ledger.lock()?;
        let animal = ledger.register_animal(form.into())?;
        let barcode_image = ledger.barcode_image(&animal.barcode)?;
        Ok(FfiRegisteredAnimal {
            animal: animal.into(),
            barcode_image,
        })
    }

    /// Look up an animal and everything recorded against it.
    pub fn animal_records(&self, barcode: String) -> Result<FfiAnimalRecords, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.animal_records(&barcode)?.into())
    }

    /// Barcode picture as a `data:image/svg+xml` URI.
    pub fn barcode_image(&self, barcode: String) -> Result<String, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.barcode_image(&barcode)?)
    }

    /// Feeding schedule for an animal.
    pub fn food_schedule(&self, barcode: String) -> Result<FfiFoodSchedule, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.food_schedule(&barcode)?.into())
    }

    pub fn get_animals(&self) -> Result<Vec<FfiAnimal>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.animals()?.into_iter().map(|a| a.into()).collect())
    }

    // =========================================================================
    // Vaccination Operations
    // =========================================================================

    pub fn record_vaccination(
        &self,
        form: FfiNewVaccination,
    ) -> Result<FfiVaccination, FarmLedgerError> {
        let form = form.try_into()?;
        let mut ledger = self.ledger.lock()?;
        Ok(ledger.record_vaccination(form)?.into())
    }

    pub fn get_vaccinations(&self) -> Result<Vec<FfiVaccination>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.vaccinations()?.into_iter().map(|v| v.into()).collect())
    }

    pub fn vaccinations_due_today(&self) -> Result<Vec<FfiVaccination>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger
            .vaccinations_due_today()?
            .into_iter()
            .map(|v| v.into())
            .collect())
    }

    pub fn vaccinations_due_this_week(&self) -> Result<Vec<FfiVaccination>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger
            .vaccinations_due_this_week()?
            .into_iter()
            .map(|v| v.into())
            .collect())
    }

    pub fn overdue_vaccinations(&self) -> Result<Vec<FfiVaccination>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger
            .overdue_vaccinations()?
            .into_iter()
            .map(|v| v.into())
            .collect())
    }

    pub fn vaccination_summary(&self) -> Result<FfiVaccinationSummary, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.vaccination_summary()?.into())
    }

    // =========================================================================
    // Health Operations
    // =========================================================================

    /// Record a checkup; a serious finding with a disease also opens an outbreak.
    pub fn record_checkup(
        &self,
        form: FfiNewCheckup,
    ) -> Result<FfiCheckupOutcome, FarmLedgerError> {
        let form = form.try_into()?;
        let mut ledger = self.ledger.lock()?;
        Ok(ledger.record_checkup(form)?.into())
    }

    pub fn get_health_checkups(&self) -> Result<Vec<FfiCheckup>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger
            .health_checkups()?
            .into_iter()
            .map(|c| c.into())
            .collect())
    }

    pub fn get_outbreaks(&self) -> Result<Vec<FfiOutbreak>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.outbreaks()?.into_iter().map(|o| o.into()).collect())
    }

    pub fn resolve_outbreak(&self, id: String) -> Result<FfiOutbreak, FarmLedgerError> {
        let mut ledger = self.ledger.lock()?;
        Ok(ledger.resolve_outbreak(&id)?.into())
    }

    pub fn outbreak_summary(&self) -> Result<FfiOutbreakSummary, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.outbreak_summary()?.into())
    }

    // =========================================================================
    // Visitor Operations
    // =========================================================================

    pub fn log_visitor(&self, form: FfiNewVisitor) -> Result<FfiVisitor, FarmLedgerError> {
        let form = form.try_into()?;
        let mut ledger = self.ledger.lock()?;
        Ok(ledger.log_visitor(form)?.into())
    }

    pub fn get_visitors(&self) -> Result<Vec<FfiVisitor>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.visitors()?.into_iter().map(|v| v.into()).collect())
    }

    // =========================================================================
    // Risk Operations
    // =========================================================================

    /// The questionnaire, options best first.
    pub fn risk_questions(&self) -> Vec<FfiRiskQuestion> {
        insights::QUESTIONS.iter().map(|q| q.into()).collect()
    }

    pub fn submit_assessment(
        &self,
        answers: HashMap<String, String>,
    ) -> Result<FfiAssessment, FarmLedgerError> {
        let mut ledger = self.ledger.lock()?;
        let answers: BTreeMap<String, String> = answers.into_iter().collect();
        Ok(ledger.submit_assessment(answers)?.into())
    }

    pub fn get_assessments(&self) -> Result<Vec<FfiAssessment>, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.assessments()?.into_iter().map(|a| a.into()).collect())
    }

    /// "Low Risk", "Medium Risk", "High Risk" or "Not Assessed".
    pub fn risk_level(&self) -> Result<String, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.risk_level()?.label().to_string())
    }

    // =========================================================================
    // Overview
    // =========================================================================

    pub fn dashboard(&self) -> Result<FfiDashboard, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.dashboard()?.into())
    }

    /// The six-step cleaning protocol.
    pub fn cleaning_steps(&self) -> Vec<FfiCleaningStep> {
        insights::CLEANING_STEPS.iter().map(|s| s.into()).collect()
    }

    pub fn cleaning_progress(&self) -> Result<FfiCleaningProgress, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.cleaning_checklist().into())
    }

    /// Mark step `index` (0-based) of the cleaning protocol done.
    pub fn complete_cleaning_step(&self, index: u32) -> Result<FfiCleaningProgress, FarmLedgerError> {
        let mut ledger = self.ledger.lock()?;
        Ok(ledger.complete_cleaning_step(index as usize)?.into())
    }

    pub fn reset_cleaning(&self) -> Result<(), FarmLedgerError> {
        let mut ledger = self.ledger.lock()?;
        ledger.reset_cleaning();
        Ok(())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export every collection as a checksummed JSON snapshot.
    pub fn export_snapshot_json(&self) -> Result<String, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.snapshot()?.to_json()?)
    }

    /// Export the vaccination schedule as CSV.
    pub fn export_vaccination_schedule_csv(&self) -> Result<String, FarmLedgerError> {
        let ledger = self.ledger.lock()?;
        Ok(ledger.vaccination_schedule()?.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, FarmLedgerError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| FarmLedgerError::InvalidInput(format!("{field}: {e}"))),
    }
}

/// FFI-safe animal.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimal {
    pub id: String,
    pub barcode: String,
    pub category: String,
    pub breed: String,
    pub dob: String,
    pub weight: f64,
    pub district: String,
    pub state: String,
    pub registration_date: String,
}

impl From<Animal> for FfiAnimal {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            barcode: animal.barcode,
            category: animal.category,
            breed: animal.breed,
            dob: animal.dob,
            weight: animal.weight,
            district: animal.district,
            state: animal.state,
            registration_date: animal.registration_date.to_string(),
        }
    }
}

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAnimal {
    pub category: String,
    pub breed: String,
    pub dob: String,
    pub weight: Option<f64>,
    pub district: String,
    pub state: String,
}

impl From<FfiNewAnimal> for NewAnimal {
    fn from(form: FfiNewAnimal) -> Self {
        NewAnimal {
            category: form.category,
            breed: form.breed,
            dob: form.dob,
            weight: form.weight,
            district: form.district,
            state: form.state,
        }
    }
}

/// FFI-safe registration result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegisteredAnimal {
    pub animal: FfiAnimal,
    /// `data:image/svg+xml;base64,...`
    pub barcode_image: String,
}

/// FFI-safe vaccination record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccination {
    pub id: String,
    pub date: String,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub vaccine_name: String,
    pub doctor_name: String,
    pub next_date: String,
}

impl From<VaccinationRecord> for FfiVaccination {
    fn from(record: VaccinationRecord) -> Self {
        Self {
            id: record.id,
            date: record.date.to_string(),
            animal_barcode: record.animal_barcode,
            animal_category: record.animal_category,
            breed: record.breed,
            vaccine_name: record.vaccine_name,
            doctor_name: record.doctor_name,
            next_date: record.next_date.to_string(),
        }
    }
}

/// FFI-safe vaccination form. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewVaccination {
    pub date: Option<String>,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub vaccine_name: String,
    pub doctor_name: String,
}

impl TryFrom<FfiNewVaccination> for NewVaccination {
    type Error = FarmLedgerError;

    fn try_from(form: FfiNewVaccination) -> Result<Self, Self::Error> {
        Ok(NewVaccination {
            date: parse_date("date", form.date)?,
            animal_barcode: form.animal_barcode,
            animal_category: form.animal_category,
            breed: form.breed,
            vaccine_name: form.vaccine_name,
            doctor_name: form.doctor_name,
        })
    }
}

/// FFI-safe vaccination counts.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccinationSummary {
    pub total: u32,
    pub due_today: u32,
    pub due_this_week: u32,
    pub overdue: u32,
}

impl From<insights::VaccinationSummary> for FfiVaccinationSummary {
    fn from(summary: insights::VaccinationSummary) -> Self {
        Self {
            total: summary.total as u32,
            due_today: summary.due_today as u32,
            due_this_week: summary.due_this_week as u32,
            overdue: summary.overdue as u32,
        }
    }
}

/// FFI-safe health checkup.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCheckup {
    pub id: String,
    pub date: String,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub weight: f64,
    pub condition: String,
    pub disease_name: Option<String>,
    pub prevention: Option<String>,
    pub notes: Option<String>,
}

impl From<HealthCheckup> for FfiCheckup {
    fn from(checkup: HealthCheckup) -> Self {
        Self {
            id: checkup.id,
            date: checkup.date.to_string(),
            animal_barcode: checkup.animal_barcode,
            animal_category: checkup.animal_category,
            breed: checkup.breed,
            weight: checkup.weight,
            condition: checkup.condition.to_string(),
            disease_name: checkup.disease_name,
            prevention: checkup.prevention,
            notes: checkup.notes,
        }
    }
}

/// FFI-safe checkup form. `condition` is healthy, mild, moderate or severe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewCheckup {
    pub date: Option<String>,
    pub animal_barcode: String,
    pub animal_category: String,
    pub breed: String,
    pub weight: Option<f64>,
    pub condition: String,
    pub disease_name: Option<String>,
    pub prevention: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<FfiNewCheckup> for NewCheckup {
    type Error = FarmLedgerError;

    fn try_from(form: FfiNewCheckup) -> Result<Self, Self::Error> {
        Ok(NewCheckup {
            date: parse_date("date", form.date)?,
            animal_barcode: form.animal_barcode,
            animal_category: form.animal_category,
            breed: form.breed,
            weight: form.weight,
            condition: form.condition.parse::<HealthCondition>()?,
            disease_name: form.disease_name,
            prevention: form.prevention,
            notes: form.notes,
        })
    }
}

/// FFI-safe checkup result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCheckupOutcome {
    pub checkup: FfiCheckup,
    pub outbreak: Option<FfiOutbreak>,
}

impl From<CheckupOutcome> for FfiCheckupOutcome {
    fn from(outcome: CheckupOutcome) -> Self {
        Self {
            checkup: outcome.checkup.into(),
            outbreak: outcome.outbreak.map(|o| o.into()),
        }
    }
}

/// FFI-safe disease outbreak.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOutbreak {
    pub id: String,
    pub date: String,
    pub disease_name: String,
    pub animal_barcode: String,
    pub prevention_method: String,
    pub status: String,
}

impl From<DiseaseOutbreak> for FfiOutbreak {
    fn from(outbreak: DiseaseOutbreak) -> Self {
        Self {
            id: outbreak.id,
            date: outbreak.date.to_string(),
            disease_name: outbreak.disease_name,
            animal_barcode: outbreak.animal_barcode,
            prevention_method: outbreak.prevention_method,
            status: outbreak.status.as_str().to_string(),
        }
    }
}

/// FFI-safe outbreak counts.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOutbreakSummary {
    pub active: u32,
    pub resolved: u32,
}

impl From<insights::OutbreakSummary> for FfiOutbreakSummary {
    fn from(summary: insights::OutbreakSummary) -> Self {
        Self {
            active: summary.active as u32,
            resolved: summary.resolved as u32,
        }
    }
}

/// FFI-safe visitor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisitor {
    pub id: String,
    pub date: String,
    pub name: String,
    pub dob: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    pub purpose: String,
}

impl From<Visitor> for FfiVisitor {
    fn from(visitor: Visitor) -> Self {
        Self {
            id: visitor.id,
            date: visitor.date.to_string(),
            name: visitor.name,
            dob: visitor.dob.map(|d| d.to_string()),
            mobile: visitor.mobile,
            address: visitor.address,
            purpose: visitor.purpose,
        }
    }
}

/// FFI-safe visitor form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewVisitor {
    pub name: String,
    pub dob: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    pub purpose: String,
}

impl TryFrom<FfiNewVisitor> for NewVisitor {
    type Error = FarmLedgerError;

    fn try_from(form: FfiNewVisitor) -> Result<Self, Self::Error> {
        Ok(NewVisitor {
            name: form.name,
            dob: parse_date("dob", form.dob)?,
            mobile: form.mobile,
            address: form.address,
            purpose: form.purpose,
        })
    }
}

/// FFI-safe risk assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub id: String,
    pub date: String,
    pub score: u8,
    pub answers: HashMap<String, String>,
}

impl From<RiskAssessment> for FfiAssessment {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            id: assessment.id,
            date: assessment.date.to_string(),
            score: assessment.score,
            answers: assessment.answers.into_iter().collect(),
        }
    }
}

/// FFI-safe questionnaire question.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRiskQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
}

impl From<&insights::RiskQuestion> for FfiRiskQuestion {
    fn from(question: &insights::RiskQuestion) -> Self {
        Self {
            id: question.id.to_string(),
            text: question.text.to_string(),
            options: question.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// FFI-safe home page counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub total_animals: u32,
    pub vaccinations_due_today: u32,
    pub active_alerts: u32,
    pub risk_score: Option<u8>,
    pub risk_level: String,
}

impl From<insights::DashboardStats> for FfiDashboard {
    fn from(stats: insights::DashboardStats) -> Self {
        Self {
            total_animals: stats.total_animals as u32,
            vaccinations_due_today: stats.vaccinations_due_today as u32,
            active_alerts: stats.active_alerts as u32,
            risk_score: stats.risk_score,
            risk_level: insights::RiskLevel::from_score(stats.risk_score)
                .label()
                .to_string(),
        }
    }
}

/// FFI-safe per-animal history.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimalRecords {
    pub animal: FfiAnimal,
    pub vaccinations: Vec<FfiVaccination>,
    pub checkups: Vec<FfiCheckup>,
    pub outbreaks: Vec<FfiOutbreak>,
}

impl From<AnimalRecords> for FfiAnimalRecords {
    fn from(records: AnimalRecords) -> Self {
        Self {
            animal: records.animal.into(),
            vaccinations: records.vaccinations.into_iter().map(|v| v.into()).collect(),
            checkups: records.checkups.into_iter().map(|c| c.into()).collect(),
            outbreaks: records.outbreaks.into_iter().map(|o| o.into()).collect(),
        }
    }
}

/// FFI-safe feeding slot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeal {
    pub time: String,
    pub food: String,
}

/// FFI-safe feeding schedule.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFoodSchedule {
    pub barcode: String,
    pub category: String,
    pub supplemented: bool,
    pub meals: Vec<FfiMeal>,
}

impl From<insights::FoodSchedule> for FfiFoodSchedule {
    fn from(schedule: insights::FoodSchedule) -> Self {
        Self {
            barcode: schedule.barcode,
            category: schedule.category.label().to_string(),
            supplemented: schedule.supplemented,
            meals: schedule
                .meals
                .into_iter()
                .map(|m| FfiMeal {
                    time: m.time.to_string(),
                    food: m.food,
                })
                .collect(),
        }
    }
}

/// FFI-safe cleaning step.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCleaningStep {
    pub title: String,
    pub description: String,
}

impl From<&insights::CleaningStep> for FfiCleaningStep {
    fn from(step: &insights::CleaningStep) -> Self {
        Self {
            title: step.title.to_string(),
            description: step.description.to_string(),
        }
    }
}

/// FFI-safe cleaning round progress.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCleaningProgress {
    /// One flag per protocol step
    pub completed: Vec<bool>,
    pub completed_count: u32,
    pub progress_percent: u8,
    /// Index of the first step not yet done
    pub next_pending: Option<u32>,
    pub finished: bool,
}

impl From<&insights::CleaningChecklist> for FfiCleaningProgress {
    fn from(checklist: &insights::CleaningChecklist) -> Self {
        Self {
            completed: (0..insights::CLEANING_STEPS.len())
                .map(|index| checklist.is_complete(index))
                .collect(),
            completed_count: checklist.completed_count() as u32,
            progress_percent: checklist.progress_percent(),
            next_pending: checklist.next_pending().map(|(index, _)| index as u32),
            finished: checklist.is_finished(),
        }
    }
}
