//! # Remote Sync Module
//!
//! Thin, best-effort client for the optional backend: push a BMI record,
//! pull the server's record list, and ask for a server-side growth check.
//! Every call degrades on failure — a network or server error is logged and
//! the caller gets an empty/`None` result, never an `Err`. Local storage
//! stays the source of truth.

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use shared::{BmiEntry, GrowthAssessment};

/// Default backend root, matching the development server
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/health";

/// Environment variable overriding the backend root
pub const BASE_URL_ENV: &str = "SPROUT_API_BASE_URL";

/// Where and as whom to sync.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub user_id: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
        }
    }

    /// Base URL from `SPROUT_API_BASE_URL`, falling back to the default
    pub fn from_env(user_id: impl Into<String>) -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, user_id)
    }
}

/// Why a sync call failed; logged, never propagated to callers.
#[derive(Debug, Error)]
enum SyncError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Serialize)]
struct AddBmiRecordRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    weight: f64,
    height: f64,
    date: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckGrowthRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    weight: f64,
    height: f64,
}

/// A BMI record in the server's field naming, normalized into [`BmiEntry`]
/// on the way in.
#[derive(Debug, Deserialize)]
struct RemoteBmiRecord {
    date: String,
    height: f64,
    weight: f64,
}

impl From<RemoteBmiRecord> for BmiEntry {
    fn from(record: RemoteBmiRecord) -> Self {
        BmiEntry {
            date_iso: record.date,
            height_cm: record.height,
            weight_kg: record.weight,
        }
    }
}

/// Blocking HTTP client for the sync endpoints.
pub struct RemoteClient {
    http: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// `POST /addBmiRecord`. Returns whether the server accepted the record.
    pub fn push_bmi_record(&self, entry: &BmiEntry) -> bool {
        match self.try_push(entry) {
            Ok(()) => true,
            Err(e) => {
                warn!("push of BMI record {} failed: {}", entry.date_iso, e);
                false
            }
        }
    }

    fn try_push(&self, entry: &BmiEntry) -> Result<(), SyncError> {
        let request = AddBmiRecordRequest {
            user_id: &self.config.user_id,
            weight: entry.weight_kg,
            height: entry.height_cm,
            date: &entry.date_iso,
        };
        let response = self.http.post(self.url("addBmiRecord")).json(&request).send()?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status()));
        }
        Ok(())
    }

    /// `GET /getBmiRecords?userId=`. Failure reads as no records.
    pub fn fetch_bmi_records(&self) -> Vec<BmiEntry> {
        match self.try_fetch() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("fetch of remote BMI records failed: {}", e);
                Vec::new()
            }
        }
    }

    fn try_fetch(&self) -> Result<Vec<BmiEntry>, SyncError> {
        let response = self
            .http
            .get(self.url("getBmiRecords"))
            .query(&[("userId", self.config.user_id.as_str())])
            .send()?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status()));
        }
        let records: Vec<RemoteBmiRecord> = response.json()?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// `POST /checkGrowth`: the server's own assessment of a measurement.
    /// Failure reads as no assessment.
    pub fn check_growth(&self, height_cm: f64, weight_kg: f64) -> Option<GrowthAssessment> {
        match self.try_check_growth(height_cm, weight_kg) {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                warn!("remote growth check failed: {}", e);
                None
            }
        }
    }

    fn try_check_growth(
        &self,
        height_cm: f64,
        weight_kg: f64,
    ) -> Result<GrowthAssessment, SyncError> {
        let request = CheckGrowthRequest {
            user_id: &self.config.user_id,
            weight: weight_kg,
            height: height_cm,
        };
        let response = self.http.post(self.url("checkGrowth")).json(&request).send()?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status()));
        }
        Ok(response.json()?)
    }
}
