//! Keyed lookup over the registry's collections.
//!
//! Every collection in the registry is a plain `Vec` searched front to back. Keys are not
//! unique: the first entity in insertion order whose key matches wins. The helpers here are
//! shared by all collections; each entity type only states what its key is through [`Keyed`].

use crate::error::{ClinicError, ClinicResult, EntityKind};

/// An entity that can be matched against a lookup key of type `K`.
///
/// People and departments are keyed by name (`K = str`), bills by their patient's name,
/// insurance policies by policy number, and appointments by the composite
/// `(patient name, doctor name)`.
pub trait Keyed<K: ?Sized> {
    fn has_key(&self, key: &K) -> bool;
}

/// Renders a lookup key for diagnostics.
pub trait KeyLabel {
    fn label(&self) -> String;
}

impl KeyLabel for str {
    fn label(&self) -> String {
        self.to_string()
    }
}

impl KeyLabel for (&str, &str) {
    fn label(&self) -> String {
        format!("({}, {})", self.0, self.1)
    }
}

/// Index of the first item matching `key`.
///
/// # Errors
///
/// Returns `ClinicError::NotFound` when nothing matches.
pub(crate) fn locate<T, K>(items: &[T], kind: EntityKind, key: &K) -> ClinicResult<usize>
where
    T: Keyed<K>,
    K: KeyLabel + ?Sized,
{
    items
        .iter()
        .position(|item| item.has_key(key))
        .ok_or_else(|| ClinicError::not_found(kind, key.label()))
}

/// Replaces the first item matching `key`, returning the displaced item.
pub(crate) fn replace_first<T, K>(
    items: &mut [T],
    kind: EntityKind,
    key: &K,
    replacement: T,
) -> ClinicResult<T>
where
    T: Keyed<K>,
    K: KeyLabel + ?Sized,
{
    let index = locate(items, kind, key)?;
    Ok(std::mem::replace(&mut items[index], replacement))
}

/// Removes and returns the first item matching `key`.
pub(crate) fn remove_first<T, K>(items: &mut Vec<T>, kind: EntityKind, key: &K) -> ClinicResult<T>
where
    T: Keyed<K>,
    K: KeyLabel + ?Sized,
{
    let index = locate(items, kind, key)?;
    Ok(items.remove(index))
}
