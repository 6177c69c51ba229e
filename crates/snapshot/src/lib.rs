//! Snapshot wire support for clinic registries.
//!
//! This crate provides the **data carriers** for a full registry snapshot and the
//! **format helpers** that turn a snapshot into text and back:
//! - JSON documents ([`Json`])
//! - XML documents with attribute-encoded fields ([`Xml`])
//!
//! It knows nothing about shared references or validation. Cross-references between entities
//! are carried by name (a bill names its patient, an appointment names its patient and doctor),
//! and `clinic-core` relinks them when a registry is rebuilt from a snapshot.

pub mod data;
pub mod json;
pub mod xml;

// Re-export facades
pub use json::Json;
pub use xml::Xml;

// Re-export data carriers
pub use data::{
    AppointmentData, BillData, ClinicSnapshot, DepartmentData, DoctorData, InsuranceData,
    MedicalRecordData, PatientData, PrescriptionData, StaffData, TreatmentPlanData,
};

/// Separator used when a list of treatment steps is flattened into a single XML attribute.
pub const TREATMENT_STEP_DELIMITER: &str = ", ";

/// Errors returned by the snapshot boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid XML: {0}")]
    InvalidXml(String),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`SnapshotError`].
pub type SnapshotResult<T> = Result<T, SnapshotError>;
