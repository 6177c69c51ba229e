use crate::keyed::Keyed;
use crate::validation::required_text;
use crate::ClinicResult;
use clinic_snapshot::InsuranceData;
use clinic_types::NonEmptyText;
use std::rc::Rc;

/// An insurance policy, identified by its policy number.
///
/// Patients share their policy through an `Rc`, so the same value can also sit in the
/// registry's own insurance list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insurance {
    pub provider: NonEmptyText,
    pub policy_number: NonEmptyText,
}

impl Insurance {
    /// # Errors
    ///
    /// Returns `ClinicError::EmptyField` if either field is blank.
    pub fn new(provider: &str, policy_number: &str) -> ClinicResult<Self> {
        Ok(Self {
            provider: required_text("provider", provider)?,
            policy_number: required_text("policy_number", policy_number)?,
        })
    }

    pub fn snapshot(&self) -> InsuranceData {
        InsuranceData {
            provider: self.provider.to_string(),
            policy_number: self.policy_number.to_string(),
        }
    }

    pub fn from_snapshot(data: InsuranceData) -> ClinicResult<Self> {
        Self::new(&data.provider, &data.policy_number)
    }
}

impl std::fmt::Display for Insurance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Insurance(Provider: {}, Policy_number: {})",
            self.provider, self.policy_number
        )
    }
}

impl Keyed<str> for Rc<Insurance> {
    fn has_key(&self, key: &str) -> bool {
        self.policy_number.as_str() == key
    }
}
