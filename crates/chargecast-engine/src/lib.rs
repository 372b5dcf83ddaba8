//! Applicant data and the interactive input collector.
//!
//! An [`Applicant`] is the complete, validated set of values the charge model
//! is asked about. It only comes into existence through
//! [`FormSession::submit()`], which refuses to produce one while any of the
//! discrete selections (gender, smoker status, region) is still unset.

pub use self::{applicant::*, collector::*};

mod applicant;
mod collector;

/// A discrete selection was still unset when the form was submitted.
///
/// Variants are ordered the way the collector checks them; only the first
/// missing selection is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IncompleteSelection {
    #[display("Please select a gender!")]
    Gender,
    #[display("Please select smoker status!")]
    Smoker,
    #[display("Please select a region!")]
    Region,
}
