//! Farm cleaning protocol checklist.

use serde::Serialize;

/// One step of the cleaning protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleaningStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const CLEANING_STEPS: [CleaningStep; 6] = [
    CleaningStep {
        title: "Pre-Cleaning Assessment",
        description: "Inspect farm areas and identify high-risk zones",
    },
    CleaningStep {
        title: "Remove Organic Matter",
        description: "Clear all visible dirt, manure, and bedding materials",
    },
    CleaningStep {
        title: "Water Washing",
        description: "High-pressure wash all surfaces with appropriate water temperature",
    },
    CleaningStep {
        title: "Disinfection",
        description: "Apply approved disinfectants following biosecurity protocols",
    },
    CleaningStep {
        title: "Drying Period",
        description: "Allow adequate drying time before restocking",
    },
    CleaningStep {
        title: "Final Inspection",
        description: "Verify cleaning effectiveness and document completion",
    },
];

/// Progress through one cleaning round. Held in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningChecklist {
    completed: [bool; CLEANING_STEPS.len()],
}

impl CleaningChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark step `index` done. Returns `false` for an out-of-range index.
    pub fn complete(&mut self, index: usize) -> bool {
        match self.completed.get_mut(index) {
            Some(done) => {
                *done = true;
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }

    /// Completed share of the protocol, 0..=100.
    pub fn progress_percent(&self) -> u8 {
        (self.completed_count() * 100 / CLEANING_STEPS.len()) as u8
    }

    /// First step not yet done.
    pub fn next_pending(&self) -> Option<(usize, &'static CleaningStep)> {
        self.completed
            .iter()
            .position(|done| !done)
            .map(|index| (index, &CLEANING_STEPS[index]))
    }

    pub fn is_finished(&self) -> bool {
        self.next_pending().is_none()
    }
}
