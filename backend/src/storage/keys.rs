//! Fixed storage keys, one per collection.
//!
//! The key strings match the browser build's local-storage keys, so an
//! exported snapshot drops straight into a [`FileStore`] directory.
//!
//! [`FileStore`]: super::file_store::FileStore

/// Singleton child profile
pub const PROFILE: &str = "child_profile";

/// Free-form caregiver notes (raw text, not JSON)
pub const SPECIAL_NOTES: &str = "special_notes";

/// BMI entry collection
pub const BMI_ENTRIES: &str = "bmi_entries";

/// Vaccine catalog (seeded defaults plus custom records)
pub const VACCINES: &str = "vaccines_db";

/// Appointment log
pub const APPOINTMENTS: &str = "appointments";

/// One-shot marker set after the demo BMI entries have been seeded
pub const BMI_DEMO_SEEDED: &str = "bmi_demo_seeded";

/// Every collection key an external context may mutate, for change watching
pub const WATCHED: [&str; 5] = [PROFILE, SPECIAL_NOTES, BMI_ENTRIES, VACCINES, APPOINTMENTS];
