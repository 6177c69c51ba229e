//! # Clinic Core
//!
//! Core business logic for the clinic registry.
//!
//! This crate contains the in-memory registry and its persistence:
//! - Record types for patients, doctors, staff, bills, appointments, departments and
//!   insurance policies
//! - Keyed create/read/update/delete over every collection ([`Clinic`])
//! - Whole-registry save and load as JSON or XML ([`ClinicCodec`])
//!
//! **No process concerns**: argument parsing, environment variables and logging setup belong in
//! `clinic-cli`.

pub mod clinic;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyed;
pub mod records;
pub mod validation;

pub use clinic::Clinic;
pub use codec::{codec_for, ClinicCodec, JsonCodec, XmlCodec};
pub use config::{format_from_env_value, ClinicConfig, Format};
pub use error::{ClinicError, ClinicResult, EntityKind};
pub use keyed::Keyed;
pub use records::{
    Appointment, Bill, Department, Doctor, Insurance, MedicalRecord, Patient, PatientRef,
    Person, Prescription, Staff, TreatmentPlan,
};

// Re-export shared value types and the snapshot carrier so callers need only this crate.
pub use clinic_snapshot::ClinicSnapshot;
pub use clinic_types::{Age, AgeError, NonEmptyText, TextError};
