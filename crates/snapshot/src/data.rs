//! Snapshot data carriers.
//!
//! These structs are the structured form of a registry at one point in time. They double as
//! the JSON wire model, so field names here are the JSON keys and field order is the order in
//! which keys are written.
//!
//! Notes:
//! - Unknown keys are rejected (`deny_unknown_fields`).
//! - `insurances` was added to the format after the other sections, so it defaults to empty.
//! - Nested per-patient lists default to empty when absent.

use serde::{Deserialize, Serialize};

/// Full registry snapshot, in stable section order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClinicSnapshot {
    pub patients: Vec<PatientData>,
    pub doctors: Vec<DoctorData>,
    pub staff: Vec<StaffData>,
    pub bills: Vec<BillData>,
    pub appointments: Vec<AppointmentData>,
    pub departments: Vec<DepartmentData>,
    #[serde(default)]
    pub insurances: Vec<InsuranceData>,
}

impl ClinicSnapshot {
    /// True when every section is empty.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
            && self.doctors.is_empty()
            && self.staff.is_empty()
            && self.bills.is_empty()
            && self.appointments.is_empty()
            && self.departments.is_empty()
            && self.insurances.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InsuranceData {
    pub provider: String,
    pub policy_number: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MedicalRecordData {
    pub diagnosis: String,
    pub treatment: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PrescriptionData {
    pub medication: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TreatmentPlanData {
    pub diagnosis: String,
    #[serde(default)]
    pub treatment_steps: Vec<String>,
}

/// A patient with its insurance and sub-records inlined.
///
/// `age` is signed so that out-of-range input survives parsing and is rejected by the
/// validating constructors in `clinic-core` with a precise error.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PatientData {
    pub name: String,
    pub age: i64,
    pub insurance: InsuranceData,
    #[serde(default)]
    pub medical_records: Vec<MedicalRecordData>,
    #[serde(default)]
    pub prescriptions: Vec<PrescriptionData>,
    #[serde(default)]
    pub treatment_plans: Vec<TreatmentPlanData>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DoctorData {
    pub name: String,
    pub age: i64,
    pub specialty: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StaffData {
    pub name: String,
    pub age: i64,
    pub position: String,
}

/// A bill, referring to its patient by name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BillData {
    pub patient: String,
    pub amount: f64,
}

/// An appointment, referring to its patient and doctor by name.
///
/// Either name is `None` when the reference could not be resolved at load time.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppointmentData {
    #[serde(default)]
    pub patient: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    pub date: String,
    pub time: String,
}

/// A department with its own copies of doctor data.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DepartmentData {
    pub name: String,
    #[serde(default)]
    pub doctors: Vec<DoctorData>,
}
