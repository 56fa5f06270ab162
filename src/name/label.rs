//! Checking individual host name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use core::fmt;

//------------ Module Configuration ------------------------------------------

/// Host name labels have a maximum length of 63 octets.
pub const MAX_LABEL_LEN: usize = 63;

//------------ check_label ---------------------------------------------------

/// Checks that `label` is an acceptable host name label.
///
/// A label is acceptable if it is not empty, is at most 63 octets long,
/// consists only of ASCII letters, digits, underscores, and hyphens, does
/// not start or end with a hyphen, and contains at least one letter.
///
/// The rules are checked in this order and the first one violated
/// determines the error returned.
pub fn check_label(label: &str) -> Result<(), LabelError> {
    if label.is_empty() {
        return Err(LabelError::Empty);
    }
    if label.len() > MAX_LABEL_LEN || !label.bytes().all(is_label_octet) {
        return Err(LabelError::LongOrInvalidChars);
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(LabelError::DashAtEdge);
    }
    if !label.bytes().any(|ch| ch.is_ascii_alphabetic()) {
        return Err(LabelError::NoAlpha);
    }
    Ok(())
}

fn is_label_octet(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'-'
}

//============ Error Types ===================================================

//------------ LabelError ----------------------------------------------------

/// A label in a host name was not acceptable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelError {
    /// The label was empty.
    ///
    /// This happens for leading, trailing (beyond a single final dot), or
    /// consecutive dots.
    Empty,

    /// The label was too long or contained characters outside of the
    /// permitted set.
    LongOrInvalidChars,

    /// The label started or ended with a hyphen.
    DashAtEdge,

    /// The label consisted only of digits, underscores, and hyphens.
    NoAlpha,
}

//--- Display and Error

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LabelError::Empty => f.write_str("empty label"),
            LabelError::LongOrInvalidChars => {
                f.write_str("label too long or contains invalid characters")
            }
            LabelError::DashAtEdge => {
                f.write_str("label starts or ends with a dash")
            }
            LabelError::NoAlpha => {
                f.write_str("label only contains digits and hyphens")
            }
        }
    }
}

impl std::error::Error for LabelError {}

//============ Testing =======================================================
