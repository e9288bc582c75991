//! # Domain Module
//!
//! Business logic for the tracker: date arithmetic, the BMI engine and its
//! chart geometry, the vaccine scheduler, appointment logging, and the
//! due-date classifier feeding the dashboard. Everything here is
//! synchronous and storage-agnostic; services reach persistence only
//! through the repository layer.

pub mod appointment_service;
pub mod bmi_service;
pub mod chart;
pub mod dates;
pub mod notification_service;
pub mod profile_service;
pub mod vaccine_service;

pub use appointment_service::AppointmentService;
pub use bmi_service::BmiService;
pub use notification_service::NotificationService;
pub use profile_service::ProfileService;
pub use vaccine_service::VaccineService;
