//! One repository per collection. Each repository owns the JSON
//! (de)serialization for its collection and recovers from malformed
//! payloads by treating them as empty; the domain services never see a
//! parse error.

pub mod appointment_repository;
pub mod bmi_repository;
pub mod profile_repository;
pub mod vaccine_repository;

pub use appointment_repository::AppointmentRepository;
pub use bmi_repository::BmiRepository;
pub use profile_repository::ProfileRepository;
pub use vaccine_repository::VaccineRepository;
