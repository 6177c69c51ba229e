//! Whole-registry persistence.
//!
//! A [`ClinicCodec`] turns a [`Clinic`] into a document on disk and back. Each codec only
//! supplies the text form of a [`ClinicSnapshot`]; file handling and relinking are shared by
//! the trait's provided methods.
//!
//! ## Failure model
//!
//! `save` renders the whole document before touching the file system, so a rendering failure
//! never leaves a truncated file behind. `load` returns a typed error for unreadable or
//! malformed input; [`ClinicCodec::load_or_empty`] logs that error and yields an empty
//! registry instead.

use crate::clinic::Clinic;
use crate::config::Format;
use crate::error::{ClinicError, ClinicResult};
use clinic_snapshot::{ClinicSnapshot, Json, Xml};
use std::fs;
use std::path::Path;

/// A document format for clinic snapshots.
pub trait ClinicCodec {
    fn format(&self) -> Format;

    /// Renders a snapshot as a complete document.
    fn render(&self, snapshot: &ClinicSnapshot) -> ClinicResult<String>;

    /// Parses a complete document into a snapshot.
    fn parse(&self, text: &str) -> ClinicResult<ClinicSnapshot>;

    /// Writes the whole registry to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Snapshot` if rendering fails, or `ClinicError::FileWrite` if the
    /// file cannot be written.
    fn save(&self, clinic: &Clinic, path: &Path) -> ClinicResult<()> {
        let document = self.render(&clinic.snapshot())?;
        fs::write(path, document).map_err(ClinicError::FileWrite)?;
        tracing::info!("saved clinic as {} to {}", self.format(), path.display());
        Ok(())
    }

    /// Reads `path` and rebuilds a registry from it.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::FileRead` if the file cannot be read, `ClinicError::Snapshot` if
    /// it is not a valid document, or a validation error if an entity in it is invalid.
    fn load(&self, path: &Path) -> ClinicResult<Clinic> {
        let text = fs::read_to_string(path).map_err(ClinicError::FileRead)?;
        let clinic = Clinic::from_snapshot(self.parse(&text)?)?;
        tracing::info!("loaded clinic as {} from {}", self.format(), path.display());
        Ok(clinic)
    }

    /// Like [`ClinicCodec::load`], but any failure is logged and yields an empty registry.
    fn load_or_empty(&self, path: &Path) -> Clinic {
        self.load(path).unwrap_or_else(|e| {
            tracing::error!("could not load clinic from {}: {}", path.display(), e);
            Clinic::new()
        })
    }
}

/// JSON documents with 4-space indentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl ClinicCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn render(&self, snapshot: &ClinicSnapshot) -> ClinicResult<String> {
        Ok(Json::render(snapshot)?)
    }

    fn parse(&self, text: &str) -> ClinicResult<ClinicSnapshot> {
        Ok(Json::parse(text)?)
    }
}

/// XML documents rooted at `<Clinic>`, with entity fields as attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlCodec;

impl ClinicCodec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn render(&self, snapshot: &ClinicSnapshot) -> ClinicResult<String> {
        Ok(Xml::render(snapshot)?)
    }

    fn parse(&self, text: &str) -> ClinicResult<ClinicSnapshot> {
        Ok(Xml::parse(text)?)
    }
}

/// Codec for `format`.
pub fn codec_for(format: Format) -> Box<dyn ClinicCodec> {
    match format {
        Format::Json => Box::new(JsonCodec),
        Format::Xml => Box::new(XmlCodec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        Appointment, Department, Doctor, Insurance, MedicalRecord, Patient, Prescription, Staff,
        TreatmentPlan,
    };
    use std::rc::Rc;
    use tempfile::TempDir;

    fn populated_clinic() -> Clinic {
        let mut clinic = Clinic::new();

        let policy = clinic.add_insurance(Insurance::new("Acme", "P100").expect("valid insurance"));
        let mut alice = Patient::new("Alice", 30, Rc::clone(&policy)).expect("valid patient");
        alice.add_medical_record(MedicalRecord::new("Flu", "Rest").expect("valid record"));
        alice.add_prescription(Prescription::new("Paracetamol").expect("valid prescription"));
        alice.add_treatment_plan(TreatmentPlan::new("Flu", ["Rest", "Fluids"]));
        let alice = clinic.add_patient(alice);
        clinic.add_patient(
            Patient::new("Bob", 45, Insurance::new("Medicover", "M7").expect("valid insurance"))
                .expect("valid patient"),
        );

        let smith =
            clinic.add_doctor(Doctor::new("Dr. Smith", 50, "Cardiology").expect("valid doctor"));
        clinic.add_staff(Staff::new("Nina", 28, "Nurse").expect("valid staff"));
        assert!(clinic.create_bill("Alice", 250.0).expect("finite amount"));
        assert!(clinic.create_bill("Bob", 99.5).expect("finite amount"));
        clinic.add_appointment(Appointment::new(alice, smith, "2024-05-01", "10:00"));

        let mut cardiology = Department::new("Cardiology");
        cardiology.add_doctor(Doctor::new("Dr. Smith", 50, "Cardiology").expect("valid doctor"));
        clinic.add_department(cardiology);

        clinic
    }

    fn assert_round_trips(codec: &dyn ClinicCodec, file_name: &str) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(file_name);
        let clinic = populated_clinic();

        codec.save(&clinic, &path).expect("save should succeed");
        let loaded = codec.load(&path).expect("load should succeed");

        assert_eq!(loaded.snapshot(), clinic.snapshot());
    }

    #[test]
    fn json_save_then_load_round_trips() {
        assert_round_trips(&JsonCodec, "clinic.json");
    }

    #[test]
    fn xml_save_then_load_round_trips() {
        assert_round_trips(&XmlCodec, "clinic.xml");
    }

    #[test]
    fn codec_for_matches_format() {
        assert_eq!(codec_for(Format::Json).format(), Format::Json);
        assert_eq!(codec_for(Format::Xml).format(), Format::Xml);
    }

    #[test]
    fn load_relinks_appointment_to_registered_patient() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");

        JsonCodec
            .save(&populated_clinic(), &path)
            .expect("save should succeed");
        let loaded = JsonCodec.load(&path).expect("load should succeed");

        let alice = loaded.get_patient("Alice").expect("patient");
        let appointment = loaded
            .get_appointment("Alice", "Dr. Smith")
            .expect("appointment");
        let linked = appointment.patient.as_ref().expect("patient linked");
        assert!(Rc::ptr_eq(linked, &alice));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");

        JsonCodec
            .save(&populated_clinic(), &path)
            .expect("first save should succeed");
        JsonCodec
            .save(&Clinic::new(), &path)
            .expect("second save should succeed");

        assert!(JsonCodec.load(&path).expect("load").is_empty());
    }

    #[test]
    fn save_to_missing_directory_is_write_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("clinic.json");

        let err = JsonCodec
            .save(&Clinic::new(), &path)
            .expect_err("parent directory does not exist");
        assert!(matches!(err, ClinicError::FileWrite(_)));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("absent.json");

        let err = JsonCodec.load(&path).expect_err("file does not exist");
        assert!(matches!(err, ClinicError::FileRead(_)));
        assert!(JsonCodec.load_or_empty(&path).is_empty());
    }

    #[test]
    fn malformed_json_loads_as_empty_registry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        fs::write(&path, "{ not json").expect("write fixture");

        let err = JsonCodec.load(&path).expect_err("document is malformed");
        assert!(matches!(err, ClinicError::Snapshot(_)));
        assert!(JsonCodec.load_or_empty(&path).is_empty());
    }

    #[test]
    fn malformed_xml_loads_as_empty_registry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.xml");
        fs::write(&path, "<Clinic><Patients>").expect("write fixture");

        assert!(XmlCodec.load(&path).is_err());
        assert!(XmlCodec.load_or_empty(&path).is_empty());
    }

    #[test]
    fn json_without_insurances_section_loads() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        let document = r#"{
            "patients": [
                {
                    "name": "Alice",
                    "age": 30,
                    "insurance": { "provider": "Acme", "policy_number": "P100" },
                    "medical_records": [],
                    "prescriptions": [],
                    "treatment_plans": []
                }
            ],
            "doctors": [],
            "staff": [],
            "bills": [ { "patient": "Alice", "amount": 250.0 } ],
            "appointments": [],
            "departments": []
        }"#;
        fs::write(&path, document).expect("write fixture");

        let loaded = JsonCodec.load(&path).expect("load should succeed");

        assert!(loaded.insurances().is_empty());
        assert_eq!(loaded.get_bill("Alice").expect("bill").amount, 250.0);
    }

    #[test]
    fn non_finite_bill_amount_in_xml_fails_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.xml");
        let mut snapshot = populated_clinic().snapshot();
        snapshot.bills[0].amount = f64::NAN;
        fs::write(&path, XmlCodec.render(&snapshot).expect("render")).expect("write fixture");

        let err = XmlCodec.load(&path).expect_err("NaN amount");
        assert!(matches!(err, ClinicError::InvalidAmount(_)));
    }

    #[test]
    fn json_save_then_load_keeps_bill_amounts_exact() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        let mut clinic = Clinic::new();
        clinic.add_patient(
            Patient::new("Alice", 30, Insurance::new("Acme", "P100").expect("valid insurance"))
                .expect("valid patient"),
        );
        for amount in [119441.75871428571, 1817797.8577142858] {
            assert!(clinic.create_bill("Alice", amount).expect("finite amount"));
        }

        JsonCodec.save(&clinic, &path).expect("save should succeed");
        let loaded = JsonCodec.load(&path).expect("load should succeed");

        let amounts: Vec<u64> = loaded.bills().iter().map(|b| b.amount.to_bits()).collect();
        assert_eq!(
            amounts,
            vec![119441.75871428571f64.to_bits(), 1817797.8577142858f64.to_bits()]
        );
    }

    #[test]
    fn invalid_entity_in_document_fails_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        let mut snapshot = populated_clinic().snapshot();
        snapshot.doctors[0].name = "   ".into();
        fs::write(&path, JsonCodec.render(&snapshot).expect("render")).expect("write fixture");

        let err = JsonCodec.load(&path).expect_err("blank doctor name");
        assert!(matches!(err, ClinicError::EmptyField { field: "name", .. }));
        assert!(JsonCodec.load_or_empty(&path).is_empty());
    }
}
