use crate::keyed::Keyed;
use crate::records::PatientRef;
use crate::validation::valid_amount;
use crate::ClinicResult;
use clinic_snapshot::BillData;

/// A bill owed by a registered patient.
#[derive(Clone, Debug)]
pub struct Bill {
    pub patient: PatientRef,
    pub amount: f64,
}

impl Bill {
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidAmount` if `amount` is NaN or infinite.
    pub fn new(patient: PatientRef, amount: f64) -> ClinicResult<Self> {
        Ok(Self {
            patient,
            amount: valid_amount(amount)?,
        })
    }

    pub fn patient_name(&self) -> String {
        self.patient.borrow().name().to_string()
    }

    /// Snapshot form; the patient is carried by name.
    pub fn snapshot(&self) -> BillData {
        BillData {
            patient: self.patient_name(),
            amount: self.amount,
        }
    }
}

impl std::fmt::Display for Bill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bill(Patient: {}, Amount: {:?})",
            self.patient.borrow().name(),
            self.amount
        )
    }
}

impl Keyed<str> for Bill {
    fn has_key(&self, key: &str) -> bool {
        self.patient.borrow().name() == key
    }
}
