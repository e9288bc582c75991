//! BMI computation, classification, and history CRUD.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use log::info;
use std::sync::Arc;

use shared::{BmiClassification, BmiEntry, StatusBand};

use super::dates;
use crate::storage::repositories::BmiRepository;
use crate::storage::traits::KeyValueStore;

/// BMI from a height in centimeters and a weight in kilograms, rounded to
/// one decimal. A zero height returns 0.0 instead of dividing by zero.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let meters = height_cm / 100.0;
    if meters == 0.0 {
        return 0.0;
    }
    (weight_kg / (meters * meters) * 10.0).round() / 10.0
}

/// Bucket a BMI value into its status band. Bands are half-open on the
/// lower bound and exclusive on the upper: 18.5 is already healthy, 25 is
/// already overweight.
pub fn classify_bmi(bmi: f64) -> BmiClassification {
    if bmi <= 0.0 {
        BmiClassification {
            label: "unknown",
            band: StatusBand::Warn,
        }
    } else if bmi < 18.5 {
        BmiClassification {
            label: "underweight",
            band: StatusBand::Danger,
        }
    } else if bmi < 25.0 {
        BmiClassification {
            label: "healthy",
            band: StatusBand::Ok,
        }
    } else if bmi < 30.0 {
        BmiClassification {
            label: "overweight",
            band: StatusBand::Warn,
        }
    } else {
        BmiClassification {
            label: "obese",
            band: StatusBand::Danger,
        }
    }
}

/// Service for the BMI history collection. All writes go through
/// upsert-by-date semantics: one entry per calendar date, last write wins.
#[derive(Clone)]
pub struct BmiService {
    repository: BmiRepository,
}

impl BmiService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: BmiRepository::new(store),
        }
    }

    /// All entries, sorted ascending by date
    pub fn list(&self) -> Result<Vec<BmiEntry>> {
        self.repository.load()
    }

    /// Insert `entry`, replacing any existing entry with the same date
    pub fn add(&self, entry: BmiEntry) -> Result<()> {
        let mut entries = self.repository.load()?;
        entries.retain(|e| e.date_iso != entry.date_iso);
        info!("Adding BMI entry for {}", entry.date_iso);
        entries.push(entry);
        entries.sort_by(|a, b| a.date_iso.cmp(&b.date_iso));
        self.repository.save(&entries)
    }

    /// Rekey the entry stored under `original_date_iso` to `updated`,
    /// replacing any entry already at the new date.
    pub fn update(&self, original_date_iso: &str, updated: BmiEntry) -> Result<()> {
        let mut entries = self.repository.load()?;
        entries.retain(|e| e.date_iso != original_date_iso && e.date_iso != updated.date_iso);
        info!(
            "Updating BMI entry {} -> {}",
            original_date_iso, updated.date_iso
        );
        entries.push(updated);
        entries.sort_by(|a, b| a.date_iso.cmp(&b.date_iso));
        self.repository.save(&entries)
    }

    /// Delete the entry at `date_iso`; absent dates are a no-op
    pub fn delete(&self, date_iso: &str) -> Result<()> {
        let mut entries = self.repository.load()?;
        let before = entries.len();
        entries.retain(|e| e.date_iso != date_iso);
        if entries.len() < before {
            info!("Deleted BMI entry for {}", date_iso);
        }
        self.repository.save(&entries)
    }

    /// Most recent entry by date, `None` when the history is empty
    pub fn latest(&self) -> Result<Option<BmiEntry>> {
        Ok(self.repository.load()?.pop())
    }

    /// Plot geometry for the whole history
    pub fn chart(&self, config: &super::chart::ChartConfig) -> Result<shared::BmiChart> {
        Ok(super::chart::build_chart(&self.repository.load()?, config))
    }

    /// Seed five demo entries over the four months leading up to `today`,
    /// once per installation: the seed only runs while the history is empty
    /// and a marker key records that it has happened. Returns whether
    /// anything was seeded.
    pub fn seed_demo(&self, today: NaiveDate) -> Result<bool> {
        if self.repository.demo_seeded()? || !self.repository.load()?.is_empty() {
            return Ok(false);
        }
        let demo = [
            (120i64, 70.0, 8.0),
            (90, 72.0, 8.5),
            (60, 74.0, 9.0),
            (30, 75.0, 9.3),
            (0, 77.0, 9.7),
        ];
        let entries: Vec<BmiEntry> = demo
            .iter()
            .map(|&(days_ago, height_cm, weight_kg)| BmiEntry {
                date_iso: dates::format_iso(today - Duration::days(days_ago)),
                height_cm,
                weight_kg,
            })
            .collect();
        self.repository.save(&entries)?;
        self.repository.mark_demo_seeded()?;
        info!("Seeded {} demo BMI entries", entries.len());
        Ok(true)
    }
}
