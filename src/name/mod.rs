//! Host names as sequences of labels.
//!
//! Destination hosts arrive as plain strings. This module splits such a
//! string into its labels, checking each of them on the way, and provides
//! the suffix matching used to recognize the names of local services.

use core::fmt;
use std::string::String;
use std::vec::Vec;

pub use self::label::{check_label, LabelError, MAX_LABEL_LEN};

mod label;

//------------ split_host ----------------------------------------------------

/// Splits a host name into its labels.
///
/// A single trailing dot, marking the name as fully qualified, is removed
/// first. The remainder is split at each dot and every resulting label is
/// checked via [`check_label`]. Empty labels are rejected which catches
/// leading and doubled dots as well as more than one trailing dot. This
/// matters because suffixes are matched based on the labels’ relative
/// positions.
pub fn split_host(host: &str) -> Result<Vec<&str>, NameError> {
    let name = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = name.split('.').collect();
    for label in &labels {
        if let Err(error) = check_label(label) {
            return Err(NameError::BadLabel {
                name: name.into(),
                error,
            });
        }
    }
    Ok(labels)
}

//------------ strip_suffix --------------------------------------------------

/// Removes `suffix` from the end of `labels` if it is there.
///
/// Returns the remaining labels and whether the suffix was found. If it
/// wasn’t, `labels` is returned unchanged. Labels are compared exactly and
/// in order.
pub fn strip_suffix<'a, L, S>(labels: &'a [L], suffix: &[S]) -> (&'a [L], bool)
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    let Some(n) = labels.len().checked_sub(suffix.len()) else {
        return (labels, false);
    };
    let (head, tail) = labels.split_at(n);
    if tail
        .iter()
        .zip(suffix)
        .all(|(left, right)| left.as_ref() == right.as_ref())
    {
        (head, true)
    } else {
        (labels, false)
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A host name is malformed.
///
/// This is returned both for names that aren’t syntactically valid and for
/// names that look like a local service name but don’t have the expected
/// shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NameError {
    /// One of the labels of the name was not acceptable.
    BadLabel { name: String, error: LabelError },

    /// The name ended in a service suffix but wasn’t a service name.
    NotAService(String),
}

impl NameError {
    /// Returns the offending name.
    pub fn name(&self) -> &str {
        match self {
            NameError::BadLabel { name, .. } => name,
            NameError::NotAService(name) => name,
        }
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NameError::BadLabel { name, error } => {
                write!(f, "invalid DNS name {}: {}", name, error)
            }
            NameError::NotAService(name) => {
                write!(f, "not a service: {}", name)
            }
        }
    }
}

impl std::error::Error for NameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NameError::BadLabel { error, .. } => Some(error),
            NameError::NotAService(_) => None,
        }
    }
}

//============ Testing =======================================================
