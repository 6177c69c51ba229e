use crate::constants::MISSING_REFERENCE;
use crate::keyed::Keyed;
use crate::records::{Doctor, PatientRef};
use clinic_snapshot::AppointmentData;
use std::rc::Rc;

/// A scheduled visit linking a patient and a doctor.
///
/// Either reference may be `None` after a load in which the named patient or doctor was not
/// present. Such an appointment never matches a `(patient, doctor)` lookup.
#[derive(Clone, Debug)]
pub struct Appointment {
    pub patient: Option<PatientRef>,
    pub doctor: Option<Rc<Doctor>>,
    pub date: String,
    pub time: String,
}

impl Appointment {
    pub fn new(
        patient: PatientRef,
        doctor: Rc<Doctor>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            patient: Some(patient),
            doctor: Some(doctor),
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn patient_name(&self) -> Option<String> {
        self.patient
            .as_ref()
            .map(|patient| patient.borrow().name().to_string())
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.doctor.as_deref().map(Doctor::name)
    }

    /// Snapshot form; patient and doctor are carried by name.
    pub fn snapshot(&self) -> AppointmentData {
        AppointmentData {
            patient: self.patient_name(),
            doctor: self.doctor_name().map(str::to_string),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

impl std::fmt::Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let patient = self.patient_name();
        write!(
            f,
            "Appointment(Patient: {}, Doctor: {}, Date: {}, Time: {})",
            patient.as_deref().unwrap_or(MISSING_REFERENCE),
            self.doctor_name().unwrap_or(MISSING_REFERENCE),
            self.date,
            self.time
        )
    }
}

impl<'a, 'b> Keyed<(&'a str, &'b str)> for Appointment {
    fn has_key(&self, key: &(&'a str, &'b str)) -> bool {
        let (patient_name, doctor_name) = *key;
        let patient_matches = self
            .patient
            .as_ref()
            .is_some_and(|patient| patient.borrow().name() == patient_name);
        patient_matches && self.doctor_name() == Some(doctor_name)
    }
}
