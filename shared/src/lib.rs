use serde::{Deserialize, Serialize};
use std::fmt;

/// One measured BMI data point. The date is the collection key: there is at
/// most one entry per calendar date, and collections are kept sorted
/// ascending by date.
///
/// Wire field names stay camelCase (`dateISO`/`heightCm`/`weightKg`) so
/// previously stored payloads keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiEntry {
    /// Measurement date in `YYYY-MM-DD` form (unique key)
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    #[serde(rename = "heightCm")]
    pub height_cm: f64,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
}

/// A vaccine dose in the catalog: either one of the seeded defaults or a
/// user-added custom record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineRecord {
    pub id: String,
    pub name: String,
    pub company: String,
    /// Calendar months after the birth date at which this dose is scheduled
    #[serde(rename = "offsetMonths")]
    pub offset_months: u32,
    #[serde(rename = "isCustom")]
    pub is_custom: bool,
    pub administered: bool,
    /// Date the dose was given; present only while `administered` is true
    #[serde(
        rename = "administeredDateISO",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub administered_date_iso: Option<String>,
}

impl VaccineRecord {
    /// Generate the id for a custom vaccine record from its display name and
    /// a creation timestamp: whitespace runs become dashes, everything is
    /// lowercased, and the epoch-millis suffix keeps ids unique.
    pub fn generate_custom_id(name: &str, timestamp_millis: i64) -> String {
        let slug = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}-{}", slug, timestamp_millis)
    }
}

/// Partial update for a vaccine record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaccineUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "offsetMonths")]
    pub offset_months: Option<u32>,
}

/// The singleton child profile. The birth date anchors every date-offset
/// computation in the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
    pub phone_number: String,
    /// Birth date in `YYYY-MM-DD` form
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data_url: Option<String>,
}

impl ChildProfile {
    /// Full display name, with surrounding whitespace trimmed so a missing
    /// first or last name does not leave a stray space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A logged doctor's appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub doctor: String,
    pub specialty: String,
    /// Appointment date in `YYYY-MM-DD` form
    #[serde(rename = "date")]
    pub date_iso: String,
    pub time: String,
    pub notes: String,
    pub completed: bool,
}

impl Appointment {
    /// Generate a unique appointment id
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Request payload for creating an appointment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub title: String,
    pub doctor: String,
    pub specialty: String,
    #[serde(rename = "date")]
    pub date_iso: String,
    pub time: String,
    pub notes: String,
}

/// Urgency band shared by the BMI classifier and the due-date classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Danger,
    Warn,
    Ok,
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusBand::Danger => "danger",
            StatusBand::Warn => "warn",
            StatusBand::Ok => "ok",
        };
        write!(f, "{}", name)
    }
}

/// A BMI value bucketed into its status band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiClassification {
    pub label: &'static str,
    pub band: StatusBand,
}

/// Source of a notification feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Vaccine,
    Appointment,
}

/// One row of the unified due-date feed shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub detail: String,
    /// `None` when no due date could be derived; classified as `Ok`
    #[serde(rename = "dueISO")]
    pub due_iso: Option<String>,
    pub band: StatusBand,
    pub kind: NotificationKind,
}

/// Margins of the logical chart canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// An axis tick: a position along one canvas axis plus its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTick {
    pub pos: f64,
    pub label: String,
}

/// A plotted entry: canvas coordinates plus enough of the source entry to
/// serve as a hit-target for tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub bmi: f64,
}

/// Plot geometry for the BMI time-series chart, expressed in a fixed logical
/// canvas so any renderer (SVG, canvas, immediate-mode UI) can scale it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiChart {
    pub margins: ChartMargins,
    pub inner_width: f64,
    pub inner_height: f64,
    /// Polyline vertices; a single entry renders as a full-width horizontal
    /// line at that entry's Y
    pub polyline: Vec<[f64; 2]>,
    pub points: Vec<ChartPoint>,
    pub x_ticks: Vec<ChartTick>,
    pub y_ticks: Vec<ChartTick>,
}

impl BmiChart {
    /// Geometry for an empty entry list
    pub fn empty(margins: ChartMargins, inner_width: f64, inner_height: f64) -> Self {
        Self {
            margins,
            inner_width,
            inner_height,
            polyline: Vec::new(),
            points: Vec::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
        }
    }
}

/// Server-computed growth assessment from the remote `checkGrowth` endpoint.
/// All fields are optional so a partial response still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssessment {
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
