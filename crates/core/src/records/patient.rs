//! Patients and the sub-records they own.
//!
//! A registered patient lives behind a [`PatientRef`] (`Rc<RefCell<Patient>>`). Bills and
//! appointments hold clones of that handle, so updating a patient's medical records or
//! prescriptions in place is visible from every bill and appointment that refers to it.

use crate::keyed::Keyed;
use crate::records::{Insurance, Person};
use crate::validation::required_text;
use crate::{ClinicError, ClinicResult};
use clinic_snapshot::{MedicalRecordData, PatientData, PrescriptionData, TreatmentPlanData};
use clinic_types::NonEmptyText;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a registered patient.
pub type PatientRef = Rc<RefCell<Patient>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedicalRecord {
    pub diagnosis: NonEmptyText,
    pub treatment: NonEmptyText,
}

impl MedicalRecord {
    pub fn new(diagnosis: &str, treatment: &str) -> ClinicResult<Self> {
        Ok(Self {
            diagnosis: required_text("diagnosis", diagnosis)?,
            treatment: required_text("treatment", treatment)?,
        })
    }

    pub fn snapshot(&self) -> MedicalRecordData {
        MedicalRecordData {
            diagnosis: self.diagnosis.to_string(),
            treatment: self.treatment.to_string(),
        }
    }

    pub fn from_snapshot(data: MedicalRecordData) -> ClinicResult<Self> {
        Self::new(&data.diagnosis, &data.treatment)
    }
}

impl std::fmt::Display for MedicalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MedicalRecord(Diagnosis: {}, Treatment: {})",
            self.diagnosis, self.treatment
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    pub medication: NonEmptyText,
}

impl Prescription {
    pub fn new(medication: &str) -> ClinicResult<Self> {
        Ok(Self {
            medication: required_text("medication", medication)?,
        })
    }

    pub fn snapshot(&self) -> PrescriptionData {
        PrescriptionData {
            medication: self.medication.to_string(),
        }
    }

    pub fn from_snapshot(data: PrescriptionData) -> ClinicResult<Self> {
        Self::new(&data.medication)
    }
}

impl std::fmt::Display for Prescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Prescription(Medication: {})", self.medication)
    }
}

/// A diagnosis with its ordered treatment steps. Neither field is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreatmentPlan {
    pub diagnosis: String,
    pub treatment_steps: Vec<String>,
}

impl TreatmentPlan {
    pub fn new<S: Into<String>>(
        diagnosis: impl Into<String>,
        treatment_steps: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            treatment_steps: treatment_steps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn snapshot(&self) -> TreatmentPlanData {
        TreatmentPlanData {
            diagnosis: self.diagnosis.clone(),
            treatment_steps: self.treatment_steps.clone(),
        }
    }

    pub fn from_snapshot(data: TreatmentPlanData) -> Self {
        Self {
            diagnosis: data.diagnosis,
            treatment_steps: data.treatment_steps,
        }
    }
}

impl std::fmt::Display for TreatmentPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TreatmentPlan(Diagnosis: {}, Steps: [{}])",
            self.diagnosis,
            self.treatment_steps.join(", ")
        )
    }
}

/// A patient with their insurance policy and clinical history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub person: Person,
    pub insurance: Rc<Insurance>,
    medical_records: Vec<MedicalRecord>,
    prescriptions: Vec<Prescription>,
    treatment_plans: Vec<TreatmentPlan>,
}

impl Patient {
    /// Creates a patient with empty history.
    ///
    /// `insurance` accepts either an owned [`Insurance`] or an `Rc` already shared with the
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is blank or `age` is negative.
    pub fn new(name: &str, age: i64, insurance: impl Into<Rc<Insurance>>) -> ClinicResult<Self> {
        Ok(Self {
            person: Person::new(name, age)?,
            insurance: insurance.into(),
            medical_records: Vec::new(),
            prescriptions: Vec::new(),
            treatment_plans: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    /// Wraps the patient in a fresh shared handle.
    pub fn into_shared(self) -> PatientRef {
        Rc::new(RefCell::new(self))
    }

    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.medical_records
    }

    pub fn add_medical_record(&mut self, record: MedicalRecord) {
        self.medical_records.push(record);
    }

    /// Overwrites the diagnosis and treatment of the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::IndexOutOfRange` if `index` does not address a record, or a
    /// validation error if either replacement value is blank. In both cases the records are
    /// left unchanged.
    pub fn update_medical_record(
        &mut self,
        index: usize,
        diagnosis: &str,
        treatment: &str,
    ) -> ClinicResult<()> {
        let len = self.medical_records.len();
        let record = self
            .medical_records
            .get_mut(index)
            .ok_or_else(|| ClinicError::index_out_of_range("medical record", index, len))?;
        *record = MedicalRecord::new(diagnosis, treatment)?;
        Ok(())
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn add_prescription(&mut self, prescription: Prescription) {
        self.prescriptions.push(prescription);
    }

    /// Overwrites the medication of the prescription at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::IndexOutOfRange` or a validation error; prescriptions are left
    /// unchanged on failure.
    pub fn update_prescription(&mut self, index: usize, medication: &str) -> ClinicResult<()> {
        let len = self.prescriptions.len();
        let prescription = self
            .prescriptions
            .get_mut(index)
            .ok_or_else(|| ClinicError::index_out_of_range("prescription", index, len))?;
        *prescription = Prescription::new(medication)?;
        Ok(())
    }

    pub fn treatment_plans(&self) -> &[TreatmentPlan] {
        &self.treatment_plans
    }

    pub fn add_treatment_plan(&mut self, plan: TreatmentPlan) {
        self.treatment_plans.push(plan);
    }

    pub fn snapshot(&self) -> PatientData {
        PatientData {
            name: self.name().to_string(),
            age: i64::from(self.age()),
            insurance: self.insurance.snapshot(),
            medical_records: self
                .medical_records
                .iter()
                .map(MedicalRecord::snapshot)
                .collect(),
            prescriptions: self
                .prescriptions
                .iter()
                .map(Prescription::snapshot)
                .collect(),
            treatment_plans: self
                .treatment_plans
                .iter()
                .map(TreatmentPlan::snapshot)
                .collect(),
        }
    }

    /// Rebuilds a patient, validating every nested record.
    pub fn from_snapshot(data: PatientData) -> ClinicResult<Self> {
        let insurance = Insurance::from_snapshot(data.insurance)?;
        let mut patient = Self::new(&data.name, data.age, insurance)?;

        patient.medical_records = data
            .medical_records
            .into_iter()
            .map(MedicalRecord::from_snapshot)
            .collect::<ClinicResult<_>>()?;
        patient.prescriptions = data
            .prescriptions
            .into_iter()
            .map(Prescription::from_snapshot)
            .collect::<ClinicResult<_>>()?;
        patient.treatment_plans = data
            .treatment_plans
            .into_iter()
            .map(TreatmentPlan::from_snapshot)
            .collect();

        Ok(patient)
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient(Name: {}, Age: {}, Insurance: {})",
            self.name(),
            self.age(),
            self.insurance.provider
        )
    }
}

impl Keyed<str> for PatientRef {
    fn has_key(&self, key: &str) -> bool {
        self.borrow().name() == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Patient {
        Patient::new(
            "Alice",
            30,
            Insurance::new("Acme", "P100").expect("valid insurance"),
        )
        .expect("valid patient")
    }

    #[test]
    fn summary_names_insurance_provider() {
        assert_eq!(
            alice().to_string(),
            "Patient(Name: Alice, Age: 30, Insurance: Acme)"
        );
    }

    #[test]
    fn update_medical_record_replaces_in_place() {
        let mut patient = alice();
        patient.add_medical_record(MedicalRecord::new("Flu", "Rest").expect("valid record"));

        patient
            .update_medical_record(0, "Cold", "Fluids")
            .expect("index 0 exists");

        assert_eq!(patient.medical_records().len(), 1);
        assert_eq!(patient.medical_records()[0].diagnosis.as_str(), "Cold");
        assert_eq!(patient.medical_records()[0].treatment.as_str(), "Fluids");
    }

    #[test]
    fn update_medical_record_out_of_range_leaves_records_unchanged() {
        let mut patient = alice();
        patient.add_medical_record(MedicalRecord::new("Flu", "Rest").expect("valid record"));
        let before = patient.medical_records().to_vec();

        let err = patient
            .update_medical_record(3, "Cold", "Fluids")
            .expect_err("index 3 does not exist");

        assert!(matches!(
            err,
            ClinicError::IndexOutOfRange {
                index: 3,
                len: 1,
                ..
            }
        ));
        assert_eq!(patient.medical_records(), before.as_slice());
    }

    #[test]
    fn update_medical_record_with_blank_value_leaves_records_unchanged() {
        let mut patient = alice();
        patient.add_medical_record(MedicalRecord::new("Flu", "Rest").expect("valid record"));

        patient
            .update_medical_record(0, "Cold", "")
            .expect_err("blank treatment should fail");

        assert_eq!(patient.medical_records()[0].diagnosis.as_str(), "Flu");
    }

    #[test]
    fn update_prescription_checks_index() {
        let mut patient = alice();
        patient.add_prescription(Prescription::new("Aspirin").expect("valid prescription"));

        patient
            .update_prescription(0, "Ibuprofen")
            .expect("index 0 exists");
        assert_eq!(patient.prescriptions()[0].medication.as_str(), "Ibuprofen");

        let err = patient
            .update_prescription(1, "Codeine")
            .expect_err("index 1 does not exist");
        assert!(err.is_not_found());
        assert_eq!(patient.prescriptions().len(), 1);
    }

    #[test]
    fn from_snapshot_rebuilds_nested_records() {
        let mut patient = alice();
        patient.add_medical_record(MedicalRecord::new("Flu", "Rest").expect("valid record"));
        patient.add_prescription(Prescription::new("Aspirin").expect("valid prescription"));
        patient.add_treatment_plan(TreatmentPlan::new("Flu", ["Rest", "Fluids"]));

        let rebuilt = Patient::from_snapshot(patient.snapshot()).expect("valid snapshot");
        assert_eq!(rebuilt, patient);
    }

    #[test]
    fn from_snapshot_rejects_invalid_nested_record() {
        let mut data = alice().snapshot();
        data.prescriptions.push(PrescriptionData {
            medication: String::new(),
        });

        let err = Patient::from_snapshot(data).expect_err("blank medication should fail");
        assert!(matches!(
            err,
            ClinicError::EmptyField {
                field: "medication",
                ..
            }
        ));
    }
}
