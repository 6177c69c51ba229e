//! The shared person shape and the staff roles built on it.

use crate::keyed::Keyed;
use crate::validation::{required_text, valid_age};
use crate::ClinicResult;
use clinic_snapshot::{DoctorData, StaffData};
use clinic_types::{Age, NonEmptyText};
use std::rc::Rc;

/// Name and age, composed into every role (patient, doctor, staff member).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: NonEmptyText,
    pub age: Age,
}

impl Person {
    /// `name` is stored trimmed of surrounding whitespace, so lookups must use the trimmed
    /// form: a person created as `" Alice "` is found under `"Alice"`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is blank or `age` is negative.
    pub fn new(name: &str, age: i64) -> ClinicResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            age: valid_age(age)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn age(&self) -> u32 {
        self.age.years()
    }
}

/// A doctor. Departments hold their own copies; appointments share the registry's `Rc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub person: Person,
    pub specialty: String,
}

impl Doctor {
    pub fn new(name: &str, age: i64, specialty: impl Into<String>) -> ClinicResult<Self> {
        Ok(Self {
            person: Person::new(name, age)?,
            specialty: specialty.into(),
        })
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    pub fn snapshot(&self) -> DoctorData {
        DoctorData {
            name: self.name().to_string(),
            age: i64::from(self.age()),
            specialty: self.specialty.clone(),
        }
    }

    pub fn from_snapshot(data: DoctorData) -> ClinicResult<Self> {
        Self::new(&data.name, data.age, data.specialty)
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Doctor(Name: {}, Age: {}, Specialty: {})",
            self.name(),
            self.age(),
            self.specialty
        )
    }
}

impl Keyed<str> for Rc<Doctor> {
    fn has_key(&self, key: &str) -> bool {
        self.name() == key
    }
}

/// A non-clinical staff member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staff {
    pub person: Person,
    pub position: String,
}

impl Staff {
    pub fn new(name: &str, age: i64, position: impl Into<String>) -> ClinicResult<Self> {
        Ok(Self {
            person: Person::new(name, age)?,
            position: position.into(),
        })
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    pub fn snapshot(&self) -> StaffData {
        StaffData {
            name: self.name().to_string(),
            age: i64::from(self.age()),
            position: self.position.clone(),
        }
    }

    pub fn from_snapshot(data: StaffData) -> ClinicResult<Self> {
        Self::new(&data.name, data.age, data.position)
    }
}

impl std::fmt::Display for Staff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Staff(Name: {}, Age: {}, Position: {})",
            self.name(),
            self.age(),
            self.position
        )
    }
}

impl Keyed<str> for Staff {
    fn has_key(&self, key: &str) -> bool {
        self.name() == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClinicError;

    #[test]
    fn person_name_is_trimmed() {
        let person = Person::new("  Alice ", 30).expect("padded name is valid");
        assert_eq!(person.name(), "Alice");
    }

    #[test]
    fn person_rejects_blank_name_and_negative_age() {
        let err = Person::new("", 30).expect_err("blank name should fail");
        assert!(matches!(err, ClinicError::EmptyField { field: "name", .. }));

        let err = Person::new("Alice", -1).expect_err("negative age should fail");
        assert!(matches!(err, ClinicError::Age(_)));
    }

    #[test]
    fn doctor_summary_matches_format() {
        let doctor = Doctor::new("Dr. Smith", 50, "Cardiology").expect("valid doctor");
        assert_eq!(
            doctor.to_string(),
            "Doctor(Name: Dr. Smith, Age: 50, Specialty: Cardiology)"
        );
    }

    #[test]
    fn staff_summary_matches_format() {
        let staff = Staff::new("Nina", 28, "Nurse").expect("valid staff");
        assert_eq!(staff.to_string(), "Staff(Name: Nina, Age: 28, Position: Nurse)");
    }

    #[test]
    fn doctor_from_snapshot_validates() {
        let err = Doctor::from_snapshot(DoctorData {
            name: "Dr. Smith".into(),
            age: -50,
            specialty: "Cardiology".into(),
        })
        .expect_err("negative age should fail");
        assert!(matches!(err, ClinicError::Age(_)));
    }
}
