//! JSON rendering and parsing of registry snapshots.
//!
//! Documents are a single object with one array per section. Output is indented with four
//! spaces and keeps the section order of [`ClinicSnapshot`].

use crate::data::ClinicSnapshot;
use crate::{SnapshotError, SnapshotResult};
use serde::Serialize;

const JSON_INDENT: &[u8] = b"    ";

/// JSON snapshot operations.
///
/// Zero-sized type used for namespacing; all methods are associated functions.
pub struct Json;

impl Json {
    /// Parse a registry snapshot from JSON text.
    ///
    /// This uses `serde_path_to_error` so that a mismatch reports the path of the failing field
    /// (for example `patients[0].age`).
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Translation`] if the text is not valid JSON or does not match
    /// the snapshot schema (wrong types, missing required keys, unknown keys), and
    /// [`SnapshotError::InvalidJson`] if trailing content follows the document.
    pub fn parse(json_text: &str) -> SnapshotResult<ClinicSnapshot> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let snapshot = match serde_path_to_error::deserialize::<_, ClinicSnapshot>(
            &mut deserializer,
        ) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(SnapshotError::Translation(format!(
                    "Clinic snapshot schema mismatch at {path}: {source}"
                )));
            }
        };

        deserializer.end()?;
        Ok(snapshot)
    }

    /// Render a registry snapshot as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if serialisation fails.
    pub fn render(snapshot: &ClinicSnapshot) -> SnapshotResult<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        snapshot.serialize(&mut serializer)?;

        String::from_utf8(buffer)
            .map_err(|e| SnapshotError::Translation(format!("rendered JSON is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        AppointmentData, BillData, DepartmentData, DoctorData, InsuranceData, MedicalRecordData,
        PatientData, PrescriptionData, StaffData, TreatmentPlanData,
    };

    fn sample_snapshot() -> ClinicSnapshot {
        ClinicSnapshot {
            patients: vec![PatientData {
                name: "Alice".into(),
                age: 30,
                insurance: InsuranceData {
                    provider: "Acme".into(),
                    policy_number: "P100".into(),
                },
                medical_records: vec![MedicalRecordData {
                    diagnosis: "Flu".into(),
                    treatment: "Rest".into(),
                }],
                prescriptions: vec![PrescriptionData {
                    medication: "Paracetamol".into(),
                }],
                treatment_plans: vec![TreatmentPlanData {
                    diagnosis: "Flu".into(),
                    treatment_steps: vec!["Rest".into(), "Fluids".into()],
                }],
            }],
            doctors: vec![DoctorData {
                name: "Dr. Smith".into(),
                age: 50,
                specialty: "Cardiology".into(),
            }],
            staff: vec![StaffData {
                name: "Nina".into(),
                age: 28,
                position: "Nurse".into(),
            }],
            bills: vec![BillData {
                patient: "Alice".into(),
                amount: 250.0,
            }],
            appointments: vec![AppointmentData {
                patient: Some("Alice".into()),
                doctor: Some("Dr. Smith".into()),
                date: "2024-05-01".into(),
                time: "10:00".into(),
            }],
            departments: vec![DepartmentData {
                name: "Cardiology".into(),
                doctors: vec![DoctorData {
                    name: "Dr. Smith".into(),
                    age: 50,
                    specialty: "Cardiology".into(),
                }],
            }],
            insurances: vec![InsuranceData {
                provider: "Acme".into(),
                policy_number: "P100".into(),
            }],
        }
    }

    #[test]
    fn round_trips_full_snapshot() {
        let snapshot = sample_snapshot();
        let text = Json::render(&snapshot).expect("render snapshot");
        let reparsed = Json::parse(&text).expect("reparse snapshot");
        assert_eq!(snapshot, reparsed);
    }

    #[test]
    fn bill_amounts_round_trip_exactly() {
        let amounts = [
            119441.75871428571,
            1817797.8577142858,
            3683299.8572857147,
            3677787.0445714286,
            1.0715660391465826e-75,
            0.1,
        ];
        let snapshot = ClinicSnapshot {
            bills: amounts
                .iter()
                .map(|&amount| BillData {
                    patient: "Alice".into(),
                    amount,
                })
                .collect(),
            ..ClinicSnapshot::default()
        };

        let text = Json::render(&snapshot).expect("render snapshot");
        let reparsed = Json::parse(&text).expect("reparse snapshot");

        let bits: Vec<u64> = reparsed.bills.iter().map(|b| b.amount.to_bits()).collect();
        let expected: Vec<u64> = amounts.iter().map(|a| a.to_bits()).collect();
        assert_eq!(bits, expected);
    }

    #[test]
    fn renders_sections_in_stable_order_with_four_space_indent() {
        let text = Json::render(&ClinicSnapshot::default()).expect("render empty snapshot");

        let keys = [
            "\"patients\"",
            "\"doctors\"",
            "\"staff\"",
            "\"bills\"",
            "\"appointments\"",
            "\"departments\"",
            "\"insurances\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(k).expect("section key should be present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("\n    \"patients\": []"));
    }

    #[test]
    fn missing_insurances_defaults_to_empty() {
        let input = r#"{
            "patients": [],
            "doctors": [],
            "staff": [],
            "bills": [],
            "appointments": [],
            "departments": []
        }"#;

        let snapshot = Json::parse(input).expect("should parse legacy document");
        assert!(snapshot.insurances.is_empty());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn null_appointment_references_parse_as_none() {
        let input = r#"{
            "patients": [], "doctors": [], "staff": [], "bills": [], "departments": [],
            "appointments": [
                {"patient": null, "doctor": "Dr. Who", "date": "2024-01-01", "time": "09:00"}
            ]
        }"#;

        let snapshot = Json::parse(input).expect("should parse appointment");
        assert_eq!(snapshot.appointments[0].patient, None);
        assert_eq!(snapshot.appointments[0].doctor.as_deref(), Some("Dr. Who"));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"{
            "patients": [], "doctors": [], "staff": [], "bills": [],
            "appointments": [], "departments": [], "wards": []
        }"#;

        let err = Json::parse(input).expect_err("should reject unknown key");
        match err {
            SnapshotError::Translation(msg) => assert!(msg.contains("wards")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_reports_path_of_wrong_type() {
        let input = r#"{
            "patients": [], "staff": [], "bills": [], "appointments": [], "departments": [],
            "doctors": [{"name": "Dr. Smith", "age": "fifty", "specialty": "Cardiology"}]
        }"#;

        let err = Json::parse(input).expect_err("should reject wrong type");
        match err {
            SnapshotError::Translation(msg) => assert!(msg.contains("doctors[0].age")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Json::parse("{ not json").expect_err("should reject malformed input");
        assert!(matches!(err, SnapshotError::Translation(_)));
    }

    #[test]
    fn rejects_trailing_content() {
        let input = r#"{"patients": [], "doctors": [], "staff": [], "bills": [],
            "appointments": [], "departments": []} trailing"#;

        let err = Json::parse(input).expect_err("should reject trailing content");
        assert!(matches!(err, SnapshotError::InvalidJson(_)));
    }
}
