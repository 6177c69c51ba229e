//! XML rendering and parsing of registry snapshots.
//!
//! The document layout is:
//!
//! ```text
//! <Clinic>
//!     <Patients>
//!         <Patient name=".." age="..">
//!             <Insurance provider=".." policy_number=".."/>
//!             <MedicalRecords><MedicalRecord diagnosis=".." treatment=".."/></MedicalRecords>
//!             <Prescriptions><Prescription medication=".."/></Prescriptions>
//!             <TreatmentPlans><TreatmentPlan diagnosis=".." treatment_steps="a, b"/></TreatmentPlans>
//!         </Patient>
//!     </Patients>
//!     <Doctors><Doctor name=".." age=".." specialty=".."/></Doctors>
//!     <Staff><StaffMember name=".." age=".." position=".."/></Staff>
//!     <Bills><Bill patient=".." amount=".."/></Bills>
//!     <Appointments><Appointment patient=".." doctor=".." date=".." time=".."/></Appointments>
//!     <Departments><Department name=".."><Doctor .../></Department></Departments>
//!     <Insurances><Insurance provider=".." policy_number=".."/></Insurances>
//! </Clinic>
//! ```
//!
//! Every entity field is an attribute. Treatment steps are flattened into one attribute joined
//! by [`TREATMENT_STEP_DELIMITER`], so a step that itself contains the delimiter is split apart
//! on the way back in.

use crate::data::{
    AppointmentData, BillData, ClinicSnapshot, DepartmentData, DoctorData, InsuranceData,
    MedicalRecordData, PatientData, PrescriptionData, StaffData, TreatmentPlanData,
};
use crate::{SnapshotError, SnapshotResult, TREATMENT_STEP_DELIMITER};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

const ROOT_ELEMENT: &str = "Clinic";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML snapshot operations.
///
/// Zero-sized type used for namespacing; all methods are associated functions.
pub struct Xml;

impl Xml {
    /// Parse a registry snapshot from XML text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidXml`] if the document is malformed or does not match the
    /// expected layout, and [`SnapshotError::InvalidInput`] if the root element is not
    /// `Clinic`.
    pub fn parse(xml_text: &str) -> SnapshotResult<ClinicSnapshot> {
        let root = root_element_name(xml_text)?;
        if root != ROOT_ELEMENT {
            return Err(SnapshotError::InvalidInput(format!(
                "Expected root element '{ROOT_ELEMENT}', got '{root}'"
            )));
        }

        let wire: ClinicXml = quick_xml::de::from_str(xml_text)
            .map_err(|e| SnapshotError::InvalidXml(e.to_string()))?;

        Ok(wire_to_snapshot(wire))
    }

    /// Render a registry snapshot as indented XML text, starting with an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidXml`] if serialisation fails.
    pub fn render(snapshot: &ClinicSnapshot) -> SnapshotResult<String> {
        let wire = snapshot_to_wire(snapshot);

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 4);
        wire.serialize(serializer)
            .map_err(|e| SnapshotError::InvalidXml(e.to_string()))?;

        Ok(format!("{XML_DECLARATION}\n{body}\n"))
    }
}

/// Name of the first element in the document.
fn root_element_name(xml_text: &str) -> SnapshotResult<String> {
    let mut reader = Reader::from_str(xml_text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(SnapshotError::InvalidXml(
                    "document has no root element".into(),
                ))
            }
            Ok(_) => continue,
            Err(e) => return Err(SnapshotError::InvalidXml(e.to_string())),
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================
//
// Attribute fields (`@`-prefixed) must be declared before child element fields.

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename = "Clinic")]
struct ClinicXml {
    #[serde(rename = "Patients", default)]
    patients: PatientsXml,
    #[serde(rename = "Doctors", default)]
    doctors: DoctorsXml,
    #[serde(rename = "Staff", default)]
    staff: StaffSectionXml,
    #[serde(rename = "Bills", default)]
    bills: BillsXml,
    #[serde(rename = "Appointments", default)]
    appointments: AppointmentsXml,
    #[serde(rename = "Departments", default)]
    departments: DepartmentsXml,
    #[serde(rename = "Insurances", default)]
    insurances: InsurancesXml,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PatientsXml {
    #[serde(rename = "Patient", default)]
    items: Vec<PatientXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct DoctorsXml {
    #[serde(rename = "Doctor", default)]
    items: Vec<DoctorXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct StaffSectionXml {
    #[serde(rename = "StaffMember", default)]
    items: Vec<StaffXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct BillsXml {
    #[serde(rename = "Bill", default)]
    items: Vec<BillXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct AppointmentsXml {
    #[serde(rename = "Appointment", default)]
    items: Vec<AppointmentXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct DepartmentsXml {
    #[serde(rename = "Department", default)]
    items: Vec<DepartmentXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct InsurancesXml {
    #[serde(rename = "Insurance", default)]
    items: Vec<InsuranceXml>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PatientXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@age")]
    age: i64,
    #[serde(rename = "Insurance")]
    insurance: InsuranceXml,
    #[serde(rename = "MedicalRecords", default)]
    medical_records: MedicalRecordsXml,
    #[serde(rename = "Prescriptions", default)]
    prescriptions: PrescriptionsXml,
    #[serde(rename = "TreatmentPlans", default)]
    treatment_plans: TreatmentPlansXml,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct MedicalRecordsXml {
    #[serde(rename = "MedicalRecord", default)]
    items: Vec<MedicalRecordXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PrescriptionsXml {
    #[serde(rename = "Prescription", default)]
    items: Vec<PrescriptionXml>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct TreatmentPlansXml {
    #[serde(rename = "TreatmentPlan", default)]
    items: Vec<TreatmentPlanXml>,
}

#[derive(Debug, Deserialize, Serialize)]
struct InsuranceXml {
    #[serde(rename = "@provider")]
    provider: String,
    #[serde(rename = "@policy_number")]
    policy_number: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct MedicalRecordXml {
    #[serde(rename = "@diagnosis")]
    diagnosis: String,
    #[serde(rename = "@treatment")]
    treatment: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct PrescriptionXml {
    #[serde(rename = "@medication")]
    medication: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct TreatmentPlanXml {
    #[serde(rename = "@diagnosis")]
    diagnosis: String,
    #[serde(rename = "@treatment_steps", default)]
    treatment_steps: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct DoctorXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@age")]
    age: i64,
    #[serde(rename = "@specialty")]
    specialty: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct StaffXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@age")]
    age: i64,
    #[serde(rename = "@position")]
    position: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct BillXml {
    #[serde(rename = "@patient")]
    patient: String,
    #[serde(rename = "@amount")]
    amount: f64,
}

#[derive(Debug, Deserialize, Serialize)]
struct AppointmentXml {
    #[serde(rename = "@patient", default, skip_serializing_if = "Option::is_none")]
    patient: Option<String>,
    #[serde(rename = "@doctor", default, skip_serializing_if = "Option::is_none")]
    doctor: Option<String>,
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@time")]
    time: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct DepartmentXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "Doctor", default)]
    doctors: Vec<DoctorXml>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn join_steps(steps: &[String]) -> String {
    steps.join(TREATMENT_STEP_DELIMITER)
}

fn split_steps(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(TREATMENT_STEP_DELIMITER)
        .map(str::to_string)
        .collect()
}

fn insurance_to_wire(data: &InsuranceData) -> InsuranceXml {
    InsuranceXml {
        provider: data.provider.clone(),
        policy_number: data.policy_number.clone(),
    }
}

fn insurance_from_wire(wire: InsuranceXml) -> InsuranceData {
    InsuranceData {
        provider: wire.provider,
        policy_number: wire.policy_number,
    }
}

fn doctor_to_wire(data: &DoctorData) -> DoctorXml {
    DoctorXml {
        name: data.name.clone(),
        age: data.age,
        specialty: data.specialty.clone(),
    }
}

fn doctor_from_wire(wire: DoctorXml) -> DoctorData {
    DoctorData {
        name: wire.name,
        age: wire.age,
        specialty: wire.specialty,
    }
}

fn patient_to_wire(data: &PatientData) -> PatientXml {
    PatientXml {
        name: data.name.clone(),
        age: data.age,
        insurance: insurance_to_wire(&data.insurance),
        medical_records: MedicalRecordsXml {
            items: data
                .medical_records
                .iter()
                .map(|r| MedicalRecordXml {
                    diagnosis: r.diagnosis.clone(),
                    treatment: r.treatment.clone(),
                })
                .collect(),
        },
        prescriptions: PrescriptionsXml {
            items: data
                .prescriptions
                .iter()
                .map(|p| PrescriptionXml {
                    medication: p.medication.clone(),
                })
                .collect(),
        },
        treatment_plans: TreatmentPlansXml {
            items: data
                .treatment_plans
                .iter()
                .map(|t| TreatmentPlanXml {
                    diagnosis: t.diagnosis.clone(),
                    treatment_steps: join_steps(&t.treatment_steps),
                })
                .collect(),
        },
    }
}

fn patient_from_wire(wire: PatientXml) -> PatientData {
    PatientData {
        name: wire.name,
        age: wire.age,
        insurance: insurance_from_wire(wire.insurance),
        medical_records: wire
            .medical_records
            .items
            .into_iter()
            .map(|r| MedicalRecordData {
                diagnosis: r.diagnosis,
                treatment: r.treatment,
            })
            .collect(),
        prescriptions: wire
            .prescriptions
            .items
            .into_iter()
            .map(|p| PrescriptionData {
                medication: p.medication,
            })
            .collect(),
        treatment_plans: wire
            .treatment_plans
            .items
            .into_iter()
            .map(|t| TreatmentPlanData {
                diagnosis: t.diagnosis,
                treatment_steps: split_steps(&t.treatment_steps),
            })
            .collect(),
    }
}

fn snapshot_to_wire(snapshot: &ClinicSnapshot) -> ClinicXml {
    ClinicXml {
        patients: PatientsXml {
            items: snapshot.patients.iter().map(patient_to_wire).collect(),
        },
        doctors: DoctorsXml {
            items: snapshot.doctors.iter().map(doctor_to_wire).collect(),
        },
        staff: StaffSectionXml {
            items: snapshot
                .staff
                .iter()
                .map(|s| StaffXml {
                    name: s.name.clone(),
                    age: s.age,
                    position: s.position.clone(),
                })
                .collect(),
        },
        bills: BillsXml {
            items: snapshot
                .bills
                .iter()
                .map(|b| BillXml {
                    patient: b.patient.clone(),
                    amount: b.amount,
                })
                .collect(),
        },
        appointments: AppointmentsXml {
            items: snapshot
                .appointments
                .iter()
                .map(|a| AppointmentXml {
                    patient: a.patient.clone(),
                    doctor: a.doctor.clone(),
                    date: a.date.clone(),
                    time: a.time.clone(),
                })
                .collect(),
        },
        departments: DepartmentsXml {
            items: snapshot
                .departments
                .iter()
                .map(|d| DepartmentXml {
                    name: d.name.clone(),
                    doctors: d.doctors.iter().map(doctor_to_wire).collect(),
                })
                .collect(),
        },
        insurances: InsurancesXml {
            items: snapshot.insurances.iter().map(insurance_to_wire).collect(),
        },
    }
}

fn wire_to_snapshot(wire: ClinicXml) -> ClinicSnapshot {
    ClinicSnapshot {
        patients: wire
            .patients
            .items
            .into_iter()
            .map(patient_from_wire)
            .collect(),
        doctors: wire
            .doctors
            .items
            .into_iter()
            .map(doctor_from_wire)
            .collect(),
        staff: wire
            .staff
            .items
            .into_iter()
            .map(|s| StaffData {
                name: s.name,
                age: s.age,
                position: s.position,
            })
            .collect(),
        bills: wire
            .bills
            .items
            .into_iter()
            .map(|b| BillData {
                patient: b.patient,
                amount: b.amount,
            })
            .collect(),
        appointments: wire
            .appointments
            .items
            .into_iter()
            .map(|a| AppointmentData {
                patient: a.patient,
                doctor: a.doctor,
                date: a.date,
                time: a.time,
            })
            .collect(),
        departments: wire
            .departments
            .items
            .into_iter()
            .map(|d| DepartmentData {
                name: d.name,
                doctors: d.doctors.into_iter().map(doctor_from_wire).collect(),
            })
            .collect(),
        insurances: wire
            .insurances
            .items
            .into_iter()
            .map(insurance_from_wire)
            .collect(),
    }
}
