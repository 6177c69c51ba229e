use crate::keyed::Keyed;
use crate::records::Doctor;
use crate::ClinicResult;
use clinic_snapshot::DepartmentData;

/// A department and the doctors assigned to it.
///
/// The doctors here are owned copies, independent of the registry's doctor list: updating a
/// doctor in the registry does not touch the copies held by departments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Department {
    pub name: String,
    doctors: Vec<Doctor>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doctors: Vec::new(),
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn add_doctor(&mut self, doctor: Doctor) {
        self.doctors.push(doctor);
    }

    pub fn snapshot(&self) -> DepartmentData {
        DepartmentData {
            name: self.name.clone(),
            doctors: self.doctors.iter().map(Doctor::snapshot).collect(),
        }
    }

    pub fn from_snapshot(data: DepartmentData) -> ClinicResult<Self> {
        let doctors = data
            .doctors
            .into_iter()
            .map(Doctor::from_snapshot)
            .collect::<ClinicResult<_>>()?;
        Ok(Self {
            name: data.name,
            doctors,
        })
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.doctors.iter().map(Doctor::name).collect();
        write!(
            f,
            "Department(Name: {}, Doctors: [{}])",
            self.name,
            names.join(", ")
        )
    }
}

impl Keyed<str> for Department {
    fn has_key(&self, key: &str) -> bool {
        self.name == key
    }
}
