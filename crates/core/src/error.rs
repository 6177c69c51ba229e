use clinic_snapshot::SnapshotError;
use clinic_types::{AgeError, TextError};

/// Entity categories held by the registry, used to label lookup failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Doctor,
    Staff,
    Bill,
    Appointment,
    Department,
    Insurance,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Patient => "patient",
            EntityKind::Doctor => "doctor",
            EntityKind::Staff => "staff member",
            EntityKind::Bill => "bill",
            EntityKind::Appointment => "appointment",
            EntityKind::Department => "department",
            EntityKind::Insurance => "insurance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("{field} cannot be empty")]
    EmptyField {
        field: &'static str,
        #[source]
        source: TextError,
    },
    #[error("invalid age: {0}")]
    Age(#[from] AgeError),
    #[error("amount must be a finite number (got {0})")]
    InvalidAmount(f64),

    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },
    #[error("{collection} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("failed to read clinic file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write clinic file: {0}")]
    FileWrite(std::io::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ClinicError {
    /// Builds a not-found error and emits the matching diagnostic.
    pub(crate) fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::warn!("{} not found: {}", kind, key);
        ClinicError::NotFound { kind, key }
    }

    /// Builds an out-of-range error and emits the matching diagnostic.
    pub(crate) fn index_out_of_range(collection: &'static str, index: usize, len: usize) -> Self {
        tracing::warn!(
            "{} index {} is out of range (length {})",
            collection,
            index,
            len
        );
        ClinicError::IndexOutOfRange {
            collection,
            index,
            len,
        }
    }

    /// True for lookup failures (`NotFound` and `IndexOutOfRange`).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClinicError::NotFound { .. } | ClinicError::IndexOutOfRange { .. }
        )
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
