//! Value records held by the clinic registry.
//!
//! Every record is built through a fallible constructor, so a value of any of these types
//! always satisfies its field invariants. Each record can produce its snapshot data carrier
//! (`snapshot()`), be rebuilt from one (`from_snapshot()`), and print a one-line summary via
//! `Display`.

pub mod appointment;
pub mod billing;
pub mod department;
pub mod insurance;
pub mod patient;
pub mod person;

pub use appointment::Appointment;
pub use billing::Bill;
pub use department::Department;
pub use insurance::Insurance;
pub use patient::{MedicalRecord, Patient, PatientRef, Prescription, TreatmentPlan};
pub use person::{Doctor, Person, Staff};
