//! The in-memory clinic registry.
//!
//! [`Clinic`] owns every collection and offers create/read/update/delete by key. All lookups
//! are linear scans in insertion order with first-match-wins semantics; nothing enforces key
//! uniqueness.
//!
//! ## Failure model
//!
//! A keyed operation that finds no match returns `ClinicError::NotFound` and logs a warning.
//! The collection is never modified on failure. [`Clinic::create_bill`] is the one exception:
//! an unknown patient is reported by its `Ok(false)` return rather than an error.
//!
//! ## Shared references
//!
//! Patients, doctors and insurance policies are held behind `Rc` handles that bills,
//! appointments and patients share. `update_*` swaps the registry's handle wholesale, so
//! entities that captured the previous handle keep seeing the previous value.

use crate::error::{ClinicResult, EntityKind};
use crate::keyed::{locate, remove_first, replace_first};
use crate::records::{
    Appointment, Bill, Department, Doctor, Insurance, Patient, PatientRef, Staff,
};
use clinic_snapshot::ClinicSnapshot;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Clinic {
    patients: Vec<PatientRef>,
    doctors: Vec<Rc<Doctor>>,
    staff: Vec<Staff>,
    bills: Vec<Bill>,
    appointments: Vec<Appointment>,
    departments: Vec<Department>,
    insurances: Vec<Rc<Insurance>>,
}

impl Clinic {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
            && self.doctors.is_empty()
            && self.staff.is_empty()
            && self.bills.is_empty()
            && self.appointments.is_empty()
            && self.departments.is_empty()
            && self.insurances.is_empty()
    }

    // ------------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------------

    pub fn patients(&self) -> &[PatientRef] {
        &self.patients
    }

    /// Registers a patient and returns the shared handle for building bills and appointments.
    pub fn add_patient(&mut self, patient: Patient) -> PatientRef {
        tracing::debug!("adding patient {}", patient.name());
        let handle = patient.into_shared();
        self.patients.push(Rc::clone(&handle));
        handle
    }

    pub fn get_patient(&self, name: &str) -> ClinicResult<PatientRef> {
        let index = locate(&self.patients, EntityKind::Patient, name)?;
        Ok(Rc::clone(&self.patients[index]))
    }

    /// Replaces the first patient named `name` and returns the new handle.
    pub fn update_patient(&mut self, name: &str, replacement: Patient) -> ClinicResult<PatientRef> {
        let handle = replacement.into_shared();
        replace_first(
            &mut self.patients,
            EntityKind::Patient,
            name,
            Rc::clone(&handle),
        )?;
        tracing::debug!("updated patient {}", name);
        Ok(handle)
    }

    pub fn remove_patient(&mut self, name: &str) -> ClinicResult<PatientRef> {
        let removed = remove_first(&mut self.patients, EntityKind::Patient, name)?;
        tracing::debug!("removed patient {}", name);
        Ok(removed)
    }

    /// Overwrites one of a registered patient's medical records in place.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::NotFound` for an unknown patient, and otherwise whatever
    /// [`Patient::update_medical_record`] returns.
    pub fn update_medical_record(
        &self,
        patient_name: &str,
        index: usize,
        diagnosis: &str,
        treatment: &str,
    ) -> ClinicResult<()> {
        let patient = self.get_patient(patient_name)?;
        patient
            .borrow_mut()
            .update_medical_record(index, diagnosis, treatment)?;
        Ok(())
    }

    /// Overwrites one of a registered patient's prescriptions in place.
    pub fn update_prescription(
        &self,
        patient_name: &str,
        index: usize,
        medication: &str,
    ) -> ClinicResult<()> {
        let patient = self.get_patient(patient_name)?;
        patient.borrow_mut().update_prescription(index, medication)?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Doctors
    // ------------------------------------------------------------------------

    pub fn doctors(&self) -> &[Rc<Doctor>] {
        &self.doctors
    }

    pub fn add_doctor(&mut self, doctor: Doctor) -> Rc<Doctor> {
        tracing::debug!("adding doctor {}", doctor.name());
        let handle = Rc::new(doctor);
        self.doctors.push(Rc::clone(&handle));
        handle
    }

    pub fn get_doctor(&self, name: &str) -> ClinicResult<Rc<Doctor>> {
        let index = locate(&self.doctors, EntityKind::Doctor, name)?;
        Ok(Rc::clone(&self.doctors[index]))
    }

    pub fn update_doctor(&mut self, name: &str, replacement: Doctor) -> ClinicResult<Rc<Doctor>> {
        let handle = Rc::new(replacement);
        replace_first(
            &mut self.doctors,
            EntityKind::Doctor,
            name,
            Rc::clone(&handle),
        )?;
        tracing::debug!("updated doctor {}", name);
        Ok(handle)
    }

    pub fn remove_doctor(&mut self, name: &str) -> ClinicResult<Rc<Doctor>> {
        let removed = remove_first(&mut self.doctors, EntityKind::Doctor, name)?;
        tracing::debug!("removed doctor {}", name);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Staff
    // ------------------------------------------------------------------------

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn add_staff(&mut self, staff: Staff) {
        tracing::debug!("adding staff member {}", staff.name());
        self.staff.push(staff);
    }

    pub fn get_staff(&self, name: &str) -> ClinicResult<&Staff> {
        let index = locate(&self.staff, EntityKind::Staff, name)?;
        Ok(&self.staff[index])
    }

    pub fn update_staff(&mut self, name: &str, replacement: Staff) -> ClinicResult<()> {
        replace_first(&mut self.staff, EntityKind::Staff, name, replacement)?;
        tracing::debug!("updated staff member {}", name);
        Ok(())
    }

    pub fn remove_staff(&mut self, name: &str) -> ClinicResult<Staff> {
        let removed = remove_first(&mut self.staff, EntityKind::Staff, name)?;
        tracing::debug!("removed staff member {}", name);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Bills
    // ------------------------------------------------------------------------

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn add_bill(&mut self, bill: Bill) {
        tracing::debug!("adding bill for {}", bill.patient_name());
        self.bills.push(bill);
    }

    /// Bills the first patient named `patient_name`.
    ///
    /// Returns `Ok(false)`, and adds nothing, when no such patient is registered.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidAmount` if `amount` is NaN or infinite.
    pub fn create_bill(&mut self, patient_name: &str, amount: f64) -> ClinicResult<bool> {
        match self.get_patient(patient_name) {
            Ok(patient) => {
                self.add_bill(Bill::new(patient, amount)?);
                Ok(true)
            }
            Err(_) => {
                tracing::warn!("no bill created: patient {} is not registered", patient_name);
                Ok(false)
            }
        }
    }

    /// First bill owed by the patient named `patient_name`.
    pub fn get_bill(&self, patient_name: &str) -> ClinicResult<&Bill> {
        let index = locate(&self.bills, EntityKind::Bill, patient_name)?;
        Ok(&self.bills[index])
    }

    pub fn update_bill(&mut self, patient_name: &str, replacement: Bill) -> ClinicResult<()> {
        replace_first(&mut self.bills, EntityKind::Bill, patient_name, replacement)?;
        tracing::debug!("updated bill for {}", patient_name);
        Ok(())
    }

    pub fn remove_bill(&mut self, patient_name: &str) -> ClinicResult<Bill> {
        let removed = remove_first(&mut self.bills, EntityKind::Bill, patient_name)?;
        tracing::debug!("removed bill for {}", patient_name);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------------

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn add_appointment(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    pub fn get_appointment(
        &self,
        patient_name: &str,
        doctor_name: &str,
    ) -> ClinicResult<&Appointment> {
        let index = locate(
            &self.appointments,
            EntityKind::Appointment,
            &(patient_name, doctor_name),
        )?;
        Ok(&self.appointments[index])
    }

    pub fn update_appointment(
        &mut self,
        patient_name: &str,
        doctor_name: &str,
        replacement: Appointment,
    ) -> ClinicResult<()> {
        replace_first(
            &mut self.appointments,
            EntityKind::Appointment,
            &(patient_name, doctor_name),
            replacement,
        )?;
        tracing::debug!("updated appointment {} / {}", patient_name, doctor_name);
        Ok(())
    }

    pub fn remove_appointment(
        &mut self,
        patient_name: &str,
        doctor_name: &str,
    ) -> ClinicResult<Appointment> {
        let removed = remove_first(
            &mut self.appointments,
            EntityKind::Appointment,
            &(patient_name, doctor_name),
        )?;
        tracing::debug!("removed appointment {} / {}", patient_name, doctor_name);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------------

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn add_department(&mut self, department: Department) {
        tracing::debug!("adding department {}", department.name);
        self.departments.push(department);
    }

    pub fn get_department(&self, name: &str) -> ClinicResult<&Department> {
        let index = locate(&self.departments, EntityKind::Department, name)?;
        Ok(&self.departments[index])
    }

    pub fn update_department(&mut self, name: &str, replacement: Department) -> ClinicResult<()> {
        replace_first(
            &mut self.departments,
            EntityKind::Department,
            name,
            replacement,
        )?;
        tracing::debug!("updated department {}", name);
        Ok(())
    }

    pub fn remove_department(&mut self, name: &str) -> ClinicResult<Department> {
        let removed = remove_first(&mut self.departments, EntityKind::Department, name)?;
        tracing::debug!("removed department {}", name);
        Ok(removed)
    }

    /// Appends a copy of `doctor` to the first department named `department_name`.
    pub fn add_doctor_to_department(
        &mut self,
        department_name: &str,
        doctor: Doctor,
    ) -> ClinicResult<()> {
        let index = locate(&self.departments, EntityKind::Department, department_name)?;
        self.departments[index].add_doctor(doctor);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Insurances
    // ------------------------------------------------------------------------

    pub fn insurances(&self) -> &[Rc<Insurance>] {
        &self.insurances
    }

    /// Registers a policy and returns the shared handle, which can be handed to a patient.
    pub fn add_insurance(&mut self, insurance: impl Into<Rc<Insurance>>) -> Rc<Insurance> {
        let handle = insurance.into();
        tracing::debug!("adding insurance {}", handle.policy_number);
        self.insurances.push(Rc::clone(&handle));
        handle
    }

    pub fn get_insurance(&self, policy_number: &str) -> ClinicResult<Rc<Insurance>> {
        let index = locate(&self.insurances, EntityKind::Insurance, policy_number)?;
        Ok(Rc::clone(&self.insurances[index]))
    }

    pub fn update_insurance(
        &mut self,
        policy_number: &str,
        replacement: Insurance,
    ) -> ClinicResult<Rc<Insurance>> {
        let handle = Rc::new(replacement);
        replace_first(
            &mut self.insurances,
            EntityKind::Insurance,
            policy_number,
            Rc::clone(&handle),
        )?;
        tracing::debug!("updated insurance {}", policy_number);
        Ok(handle)
    }

    pub fn remove_insurance(&mut self, policy_number: &str) -> ClinicResult<Rc<Insurance>> {
        let removed = remove_first(&mut self.insurances, EntityKind::Insurance, policy_number)?;
        tracing::debug!("removed insurance {}", policy_number);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Structured copy of the whole registry, in stable section order.
    pub fn snapshot(&self) -> ClinicSnapshot {
        ClinicSnapshot {
            patients: self
                .patients
                .iter()
                .map(|patient| patient.borrow().snapshot())
                .collect(),
            doctors: self.doctors.iter().map(|doctor| doctor.snapshot()).collect(),
            staff: self.staff.iter().map(Staff::snapshot).collect(),
            bills: self.bills.iter().map(Bill::snapshot).collect(),
            appointments: self
                .appointments
                .iter()
                .map(Appointment::snapshot)
                .collect(),
            departments: self.departments.iter().map(Department::snapshot).collect(),
            insurances: self
                .insurances
                .iter()
                .map(|insurance| insurance.snapshot())
                .collect(),
        }
    }

    /// Rebuilds a registry from a snapshot, relinking shared references by name.
    ///
    /// Sections are restored in dependency order:
    /// 1. patients, with their insurance and history inline
    /// 2. doctors and staff
    /// 3. bills, through [`Clinic::create_bill`]; a bill naming an unknown patient is dropped
    /// 4. appointments, resolving patient and doctor by name; unknown names become `None`
    /// 5. departments, each with its own doctor copies
    /// 6. insurances
    ///
    /// # Errors
    ///
    /// Returns the first validation error met. No partially rebuilt registry is returned.
    pub fn from_snapshot(snapshot: ClinicSnapshot) -> ClinicResult<Self> {
        let mut clinic = Clinic::new();

        for data in snapshot.patients {
            clinic.add_patient(Patient::from_snapshot(data)?);
        }
        for data in snapshot.doctors {
            clinic.add_doctor(Doctor::from_snapshot(data)?);
        }
        for data in snapshot.staff {
            clinic.add_staff(Staff::from_snapshot(data)?);
        }
        for data in snapshot.bills {
            clinic.create_bill(&data.patient, data.amount)?;
        }
        for data in snapshot.appointments {
            let patient = data
                .patient
                .as_deref()
                .and_then(|name| clinic.get_patient(name).ok());
            let doctor = data
                .doctor
                .as_deref()
                .and_then(|name| clinic.get_doctor(name).ok());
            clinic.add_appointment(Appointment {
                patient,
                doctor,
                date: data.date,
                time: data.time,
            });
        }
        for data in snapshot.departments {
            clinic.add_department(Department::from_snapshot(data)?);
        }
        for data in snapshot.insurances {
            clinic.add_insurance(Insurance::from_snapshot(data)?);
        }

        Ok(clinic)
    }
}

impl std::fmt::Display for Clinic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Patients:")?;
        for patient in &self.patients {
            writeln!(f, "  {}", patient.borrow())?;
        }
        writeln!(f, "Doctors:")?;
        for doctor in &self.doctors {
            writeln!(f, "  {doctor}")?;
        }
        writeln!(f, "Staff:")?;
        for staff in &self.staff {
            writeln!(f, "  {staff}")?;
        }
        writeln!(f, "Bills:")?;
        for bill in &self.bills {
            writeln!(f, "  {bill}")?;
        }
        writeln!(f, "Appointments:")?;
        for appointment in &self.appointments {
            writeln!(f, "  {appointment}")?;
        }
        writeln!(f, "Departments:")?;
        for department in &self.departments {
            writeln!(f, "  {department}")?;
        }
        writeln!(f, "Insurances:")?;
        for insurance in &self.insurances {
            writeln!(f, "  {insurance}")?;
        }
        Ok(())
    }
}
