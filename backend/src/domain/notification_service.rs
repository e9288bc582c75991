//! Due-date classification and the unified dashboard feed.
//!
//! The same classifier buckets vaccine due dates and appointment dates, so
//! both kinds of item carry the same urgency semantics in one feed.

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use shared::{Appointment, ChildProfile, NotificationItem, NotificationKind, StatusBand, VaccineRecord};

use super::dates;
use super::vaccine_service::due_date_iso;
use crate::storage::repositories::{AppointmentRepository, ProfileRepository, VaccineRepository};
use crate::storage::traits::KeyValueStore;

/// Days ahead within which an upcoming date is flagged `Warn`
pub const DEFAULT_NEAR_DAYS: i64 = 7;

/// Maximum number of items surfaced in the feed
pub const MAX_FEED_ITEMS: usize = 50;

/// Bucket a due date relative to `today` (start of the local day):
/// overdue is `Danger`, due within `near_days` (inclusive, counting today)
/// is `Warn`, anything later is `Ok`. A missing due date carries no urgency
/// signal and classifies as `Ok`.
pub fn classify_due(due: Option<NaiveDate>, near_days: i64, today: NaiveDate) -> StatusBand {
    let Some(due) = due else {
        return StatusBand::Ok;
    };
    let diff = dates::days_between(today, due);
    if diff < 0 {
        StatusBand::Danger
    } else if diff <= near_days {
        StatusBand::Warn
    } else {
        StatusBand::Ok
    }
}

/// Build the unified feed from unadministered vaccines and uncompleted
/// appointments, classified against `today`, sorted ascending by due date,
/// and capped at [`MAX_FEED_ITEMS`].
///
/// Vaccines without a computable due date (no profile, no parseable birth
/// date) are omitted; appointments always appear, with an unparseable date
/// classifying as `Ok`.
pub fn build_feed(
    vaccines: &[VaccineRecord],
    appointments: &[Appointment],
    profile: Option<&ChildProfile>,
    today: NaiveDate,
) -> Vec<NotificationItem> {
    let mut items: Vec<(Option<NaiveDate>, NotificationItem)> = Vec::new();

    for record in vaccines.iter().filter(|r| !r.administered) {
        let Some(due_iso) = due_date_iso(record.offset_months, profile) else {
            continue;
        };
        let due = dates::parse_iso(&due_iso);
        items.push((
            due,
            NotificationItem {
                id: record.id.clone(),
                title: record.name.clone(),
                detail: record.company.clone(),
                due_iso: Some(due_iso),
                band: classify_due(due, DEFAULT_NEAR_DAYS, today),
                kind: NotificationKind::Vaccine,
            },
        ));
    }

    for appointment in appointments.iter().filter(|a| !a.completed) {
        let due = dates::parse_iso(&appointment.date_iso);
        items.push((
            due,
            NotificationItem {
                id: appointment.id.clone(),
                title: appointment.title.clone(),
                detail: format!("{} - {}", appointment.doctor, appointment.specialty),
                due_iso: due.map(dates::format_iso),
                band: classify_due(due, DEFAULT_NEAR_DAYS, today),
                kind: NotificationKind::Appointment,
            },
        ));
    }

    // Ascending by due date, dateless items last
    items.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    items.truncate(MAX_FEED_ITEMS);
    items.into_iter().map(|(_, item)| item).collect()
}

/// Repository-backed feed assembly: loads the catalog, the appointment log,
/// and the profile, then delegates to [`build_feed`].
#[derive(Clone)]
pub struct NotificationService {
    vaccines: VaccineRepository,
    appointments: AppointmentRepository,
    profile: ProfileRepository,
}

impl NotificationService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            vaccines: VaccineRepository::new(store.clone()),
            appointments: AppointmentRepository::new(store.clone()),
            profile: ProfileRepository::new(store),
        }
    }

    /// The feed as of `today`
    pub fn feed(&self, today: NaiveDate) -> Result<Vec<NotificationItem>> {
        let vaccines = self.vaccines.load()?;
        let appointments = self.appointments.load()?;
        let profile = self.profile.load()?;
        let feed = build_feed(&vaccines, &appointments, profile.as_ref(), today);
        debug!(
            "Built feed: {} items from {} vaccines, {} appointments",
            feed.len(),
            vaccines.len(),
            appointments.len()
        );
        Ok(feed)
    }
}
