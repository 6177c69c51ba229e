use clap::{Parser, Subcommand};
use clinic_core::{
    codec_for, format_from_env_value, Appointment, Clinic, ClinicConfig, ClinicResult,
    Department, Doctor, Format, Insurance, MedicalRecord, Patient, Prescription, Staff,
    TreatmentPlan,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic records CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of every entity in a clinic file
    Show {
        /// Clinic file to read
        file: PathBuf,
        /// Format of the file (json or xml); inferred from the extension when omitted
        #[arg(long)]
        format: Option<Format>,
    },
    /// Convert a clinic file between formats
    Convert {
        /// Clinic file to read
        input: PathBuf,
        /// Clinic file to write; its extension picks the output format
        output: PathBuf,
    },
    /// Write a small demonstration clinic
    Sample {
        /// Clinic file to write
        output: PathBuf,
    },
}

/// Entry point for the clinic CLI.
///
/// # Environment Variables
/// - `CLINIC_FORMAT`: format used when a path has no recognised extension (default: "json")
/// - `RUST_LOG`: log filter (default: "clinic=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("clinic=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClinicConfig::new(format_from_env_value(std::env::var("CLINIC_FORMAT").ok())?);
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show { file, format }) => {
            let format = format.unwrap_or_else(|| config.format_for(&file));
            let clinic = codec_for(format).load(&file)?;
            print!("{clinic}");
        }
        Some(Commands::Convert { input, output }) => {
            convert(&config, &input, &output)?;
            println!("Converted {} to {}", input.display(), output.display());
        }
        Some(Commands::Sample { output }) => {
            let clinic = sample_clinic()?;
            codec_for(config.format_for(&output)).save(&clinic, &output)?;
            println!("Wrote sample clinic to {}", output.display());
        }
        None => {
            println!("Use 'clinic --help' for commands");
        }
    }

    Ok(())
}

fn convert(config: &ClinicConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let clinic = codec_for(config.format_for(input)).load(input)?;
    codec_for(config.format_for(output)).save(&clinic, output)?;
    tracing::info!(
        "converted {} ({}) to {} ({})",
        input.display(),
        config.format_for(input),
        output.display(),
        config.format_for(output)
    );
    Ok(())
}

/// A registry with a couple of entries in every collection.
fn sample_clinic() -> ClinicResult<Clinic> {
    let mut clinic = Clinic::new();

    let acme = clinic.add_insurance(Insurance::new("Acme Health", "AH-1001")?);
    let medicover = clinic.add_insurance(Insurance::new("Medicover", "MC-2002")?);

    let mut alice = Patient::new("Alice", 30, Rc::clone(&acme))?;
    alice.add_medical_record(MedicalRecord::new("Flu", "Rest and fluids")?);
    alice.add_prescription(Prescription::new("Paracetamol")?);
    alice.add_treatment_plan(TreatmentPlan::new("Flu", ["Rest", "Fluids", "Follow-up"]));
    let alice = clinic.add_patient(alice);

    let mut bob = Patient::new("Bob", 52, medicover)?;
    bob.add_medical_record(MedicalRecord::new("Hypertension", "Medication")?);
    bob.add_prescription(Prescription::new("Lisinopril")?);
    let bob = clinic.add_patient(bob);

    let smith = clinic.add_doctor(Doctor::new("Dr. Smith", 50, "Cardiology")?);
    let jones = clinic.add_doctor(Doctor::new("Dr. Jones", 44, "General Practice")?);

    clinic.add_staff(Staff::new("Nina", 28, "Nurse")?);
    clinic.add_staff(Staff::new("Omar", 35, "Receptionist")?);

    clinic.create_bill("Alice", 250.0)?;
    clinic.create_bill("Bob", 120.5)?;

    clinic.add_appointment(Appointment::new(
        alice,
        Rc::clone(&jones),
        "2024-05-01",
        "10:00",
    ));
    clinic.add_appointment(Appointment::new(bob, Rc::clone(&smith), "2024-05-02", "14:30"));

    let mut cardiology = Department::new("Cardiology");
    cardiology.add_doctor(Doctor::clone(&smith));
    clinic.add_department(cardiology);

    let mut general = Department::new("General Practice");
    general.add_doctor(Doctor::clone(&jones));
    clinic.add_department(general);

    Ok(clinic)
}
