//! The farm ledger service: one method per form workflow.
//!
//! Each write validates its form, stamps an id and date from the injected
//! clock and appends to the matching collection. Derived views read the
//! collections fresh on every call.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::barcode::{self, SvgOptions};
use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config::{Config, ScheduleConfig, StorageBackend};
use crate::error::{FarmError, FarmResult};
use crate::export::{FarmSnapshot, VaccinationScheduleExport};
use crate::insights::{
    self, CleaningChecklist, DashboardStats, FoodSchedule, OutbreakSummary, RiskLevel, VaccinationSummary,
};
use crate::models::{
    Animal, Collection, DiseaseOutbreak, HealthCheckup, NewAnimal, NewCheckup, NewVaccination,
    NewVisitor, OutbreakStatus, RiskAssessment, VaccinationRecord, Visitor,
};
use crate::repository::Repository;
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

/// Number of similar barcodes offered when a lookup misses.
const MAX_SUGGESTIONS: usize = 3;

/// Store type chosen at runtime from configuration.
pub type DynStore = Box<dyn KeyValueStore + Send>;

/// Result of recording a checkup.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckupOutcome {
    pub checkup: HealthCheckup,
    /// Outbreak opened by this checkup, already stored
    pub outbreak: Option<DiseaseOutbreak>,
}

/// Everything recorded against one animal.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalRecords {
    pub animal: Animal,
    pub vaccinations: Vec<VaccinationRecord>,
    pub checkups: Vec<HealthCheckup>,
    pub outbreaks: Vec<DiseaseOutbreak>,
}

/// Farm record-keeping service over a key-value store.
#[derive(Debug)]
pub struct FarmLedger<S: KeyValueStore, C: Clock = SystemClock> {
    repo: Repository<S>,
    clock: C,
    ids: IdGenerator,
    schedule: ScheduleConfig,
    cleaning: CleaningChecklist,
}

impl FarmLedger<DynStore, SystemClock> {
    /// Open the ledger described by `config`.
    pub fn open(config: &Config) -> FarmResult<Self> {
        config.validate()?;

        let store: DynStore = match config.storage.backend {
            StorageBackend::Sqlite => {
                Box::new(SqliteStore::open(config.database_path())?.with_capacity(config.capacity()))
            }
            StorageBackend::Memory => match config.capacity() {
                Some(bytes) => Box::new(MemoryStore::with_capacity(bytes)),
                None => Box::new(MemoryStore::new()),
            },
        };

        let repo = Repository::open(store, config.storage.seed_examples)?;
        info!(backend = ?config.storage.backend, "farm ledger opened");
        Ok(Self::new(repo, SystemClock, config.schedule))
    }
}

impl<S: KeyValueStore, C: Clock> FarmLedger<S, C> {
    pub fn new(repo: Repository<S>, clock: C, schedule: ScheduleConfig) -> Self {
        Self {
            repo,
            clock,
            ids: IdGenerator::new(),
            schedule,
            cleaning: CleaningChecklist::new(),
        }
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn schedule(&self) -> ScheduleConfig {
        self.schedule
    }

    fn next_id(&mut self) -> String {
        self.ids.next_id(self.clock.now())
    }

    // =========================================================================
    // Form workflows
    // =========================================================================

    /// Register an animal under a freshly generated barcode.
    pub fn register_animal(&mut self, form: NewAnimal) -> FarmResult<Animal> {
        let valid = form.validate()?;
        let now = self.clock.now();
        let barcode = barcode::generate_barcode_at(
            valid.category.label(),
            now.timestamp_millis(),
            &mut rand::thread_rng(),
        );

        let animal = Animal {
            id: self.next_id(),
            barcode,
            category: valid.category.label().to_string(),
            breed: valid.breed,
            dob: valid.dob,
            weight: valid.weight,
            district: valid.district,
            state: valid.state,
            registration_date: self.clock.today(),
        };
        self.repo.add(&animal)?;
        info!(barcode = %animal.barcode, "registered animal");
        Ok(animal)
    }

    /// Record a vaccination; the next dose is due after the configured interval.
    pub fn record_vaccination(&mut self, form: NewVaccination) -> FarmResult<VaccinationRecord> {
        let id = self.next_id();
        let record = form.into_record(
            id,
            self.clock.today(),
            self.schedule.vaccination_interval_months,
        )?;
        self.repo.add(&record)?;
        debug!(barcode = %record.animal_barcode, next_date = %record.next_date, "recorded vaccination");
        Ok(record)
    }

    /// Record a checkup, opening an outbreak when the finding calls for one.
    ///
    /// Both records are stored, or neither: when the outbreak cannot be
    /// written the checkup is removed again before the error is returned.
    pub fn record_checkup(&mut self, form: NewCheckup) -> FarmResult<CheckupOutcome> {
        let id = self.next_id();
        let checkup = form.into_record(id, self.clock.today())?;
        let outbreak_id = self.next_id();
        let outbreak = insights::escalate(&checkup, outbreak_id);

        self.repo.add(&checkup)?;
        if let Some(outbreak) = &outbreak {
            if let Err(err) = self.repo.add(outbreak) {
                if let Err(rollback) = self.repo.delete::<HealthCheckup>(&checkup.id) {
                    warn!(checkup_id = %checkup.id, error = %rollback, "checkup rollback failed");
                }
                return Err(err.into());
            }
            info!(
                barcode = %outbreak.animal_barcode,
                disease = %outbreak.disease_name,
                condition = %checkup.condition,
                "checkup escalated to outbreak"
            );
        }

        Ok(CheckupOutcome { checkup, outbreak })
    }

    /// Log a farm visitor.
    pub fn log_visitor(&mut self, form: NewVisitor) -> FarmResult<Visitor> {
        let id = self.next_id();
        let visitor = form.into_record(id, self.clock.today())?;
        self.repo.add(&visitor)?;
        debug!(visitor_id = %visitor.id, "logged visitor");
        Ok(visitor)
    }

    /// Score and store a completed questionnaire.
    ///
    /// Only answers to the questionnaire's own questions are kept.
    pub fn submit_assessment(
        &mut self,
        answers: BTreeMap<String, String>,
    ) -> FarmResult<RiskAssessment> {
        let score = insights::score_answers(&answers)?;
        let answers = answers
            .into_iter()
            .filter(|(question, _)| insights::risk::question(question).is_some())
            .collect();

        let assessment = RiskAssessment {
            id: self.next_id(),
            date: self.clock.today(),
            score,
            answers,
        };
        self.repo.add(&assessment)?;
        info!(score, "submitted risk assessment");
        Ok(assessment)
    }

    /// Mark an outbreak resolved.
    pub fn resolve_outbreak(&mut self, id: &str) -> FarmResult<DiseaseOutbreak> {
        let patch = json!({ "status": OutbreakStatus::Resolved.as_str() });
        if !self.repo.update::<DiseaseOutbreak>(id, &patch)? {
            return Err(FarmError::not_found(Collection::Outbreaks, id));
        }
        info!(outbreak_id = id, "resolved outbreak");

        self.repo
            .find_by_id::<DiseaseOutbreak>(id)?
            .ok_or_else(|| FarmError::not_found(Collection::Outbreaks, id))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The animal with `barcode`, or a not-found error listing similar barcodes.
    pub fn find_animal(&self, barcode: &str) -> FarmResult<Animal> {
        let barcode = barcode.trim();
        let animals = self.repo.animals()?;
        if let Some(animal) = animals.iter().find(|a| a.barcode == barcode) {
            return Ok(animal.clone());
        }

        let suggestions = barcode::suggest_barcodes(
            barcode,
            animals.iter().map(|a| a.barcode.as_str()),
            MAX_SUGGESTIONS,
        );
        debug!(barcode, suggestions = suggestions.len(), "barcode lookup missed");
        Err(FarmError::AnimalNotFound {
            barcode: barcode.to_string(),
            suggestions,
        })
    }

    /// An animal together with every record referencing its barcode.
    pub fn animal_records(&self, barcode: &str) -> FarmResult<AnimalRecords> {
        let animal = self.find_animal(barcode)?;
        let key = animal.barcode.as_str();

        Ok(AnimalRecords {
            vaccinations: self
                .repo
                .vaccinations()?
                .into_iter()
                .filter(|v| v.animal_barcode == key)
                .collect(),
            checkups: self
                .repo
                .health_checkups()?
                .into_iter()
                .filter(|c| c.animal_barcode == key)
                .collect(),
            outbreaks: self
                .repo
                .outbreaks()?
                .into_iter()
                .filter(|o| o.animal_barcode == key)
                .collect(),
            animal,
        })
    }

    /// Today's feeding schedule for an animal.
    pub fn food_schedule(&self, barcode: &str) -> FarmResult<FoodSchedule> {
        let animal = self.find_animal(barcode)?;
        let checkups = self.repo.health_checkups()?;
        Ok(insights::schedule_for(&animal.barcode, animal.kind(), &checkups))
    }

    /// Barcode picture as a `data:` URI.
    pub fn barcode_image(&self, barcode: &str) -> FarmResult<String> {
        Ok(barcode::code128::data_uri(barcode.trim(), &SvgOptions::default())?)
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    pub fn dashboard(&self) -> FarmResult<DashboardStats> {
        Ok(insights::dashboard(
            &self.repo.animals()?,
            &self.repo.vaccinations()?,
            &self.repo.outbreaks()?,
            &self.repo.assessments()?,
            self.clock.today(),
        ))
    }

    pub fn vaccinations_due_today(&self) -> FarmResult<Vec<VaccinationRecord>> {
        let records = self.repo.vaccinations()?;
        Ok(insights::due_today(&records, self.clock.today())
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn vaccinations_due_this_week(&self) -> FarmResult<Vec<VaccinationRecord>> {
        let records = self.repo.vaccinations()?;
        Ok(
            insights::due_within(&records, self.clock.today(), self.schedule.due_window_days)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    pub fn overdue_vaccinations(&self) -> FarmResult<Vec<VaccinationRecord>> {
        let records = self.repo.vaccinations()?;
        Ok(insights::overdue(&records, self.clock.today())
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn vaccination_summary(&self) -> FarmResult<VaccinationSummary> {
        Ok(VaccinationSummary::compute(
            &self.repo.vaccinations()?,
            self.clock.today(),
            self.schedule.due_window_days,
        ))
    }

    pub fn active_outbreaks(&self) -> FarmResult<Vec<DiseaseOutbreak>> {
        Ok(self
            .repo
            .outbreaks()?
            .into_iter()
            .filter(DiseaseOutbreak::is_active)
            .collect())
    }

    pub fn outbreak_summary(&self) -> FarmResult<OutbreakSummary> {
        Ok(OutbreakSummary::compute(&self.repo.outbreaks()?))
    }

    pub fn latest_risk_score(&self) -> FarmResult<Option<u8>> {
        Ok(insights::latest_risk_score(&self.repo.assessments()?))
    }

    pub fn risk_level(&self) -> FarmResult<RiskLevel> {
        Ok(RiskLevel::from_score(self.latest_risk_score()?))
    }

    // =========================================================================
    // Cleaning round
    // =========================================================================

    /// Progress through the current cleaning round.
    pub fn cleaning_checklist(&self) -> &CleaningChecklist {
        &self.cleaning
    }

    /// Mark one protocol step done.
    pub fn complete_cleaning_step(&mut self, index: usize) -> FarmResult<&CleaningChecklist> {
        if !self.cleaning.complete(index) {
            return Err(FarmError::InvalidField {
                field: "step",
                reason: format!("no cleaning step {index}"),
            });
        }
        if self.cleaning.is_finished() {
            info!("cleaning protocol finished");
        }
        Ok(&self.cleaning)
    }

    /// Start a new cleaning round.
    pub fn reset_cleaning(&mut self) {
        self.cleaning = CleaningChecklist::new();
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub fn animals(&self) -> FarmResult<Vec<Animal>> {
        Ok(self.repo.animals()?)
    }

    pub fn vaccinations(&self) -> FarmResult<Vec<VaccinationRecord>> {
        Ok(self.repo.vaccinations()?)
    }

    pub fn health_checkups(&self) -> FarmResult<Vec<HealthCheckup>> {
        Ok(self.repo.health_checkups()?)
    }

    pub fn outbreaks(&self) -> FarmResult<Vec<DiseaseOutbreak>> {
        Ok(self.repo.outbreaks()?)
    }

    pub fn visitors(&self) -> FarmResult<Vec<Visitor>> {
        Ok(self.repo.visitors()?)
    }

    pub fn assessments(&self) -> FarmResult<Vec<RiskAssessment>> {
        Ok(self.repo.assessments()?)
    }

    // =========================================================================
    // Export
    // =========================================================================

    pub fn snapshot(&self) -> FarmResult<FarmSnapshot> {
        FarmSnapshot::capture(&self.repo, self.clock.now())
    }

    pub fn vaccination_schedule(&self) -> FarmResult<VaccinationScheduleExport> {
        Ok(VaccinationScheduleExport::build(
            &self.repo.vaccinations()?,
            self.clock.today(),
            self.schedule.due_window_days,
        ))
    }
}
