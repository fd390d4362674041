//! Shared data model for the Groundwork lead-intake client.
//!
//! Everything here is plain data: form schemas and values, validation
//! results, geocoding payloads and prospect identifiers. Behaviour lives in
//! `groundwork-engine`.

mod address;
mod field;
mod prospect;
mod record;
mod validation;

pub use address::{AddressSuggestion, GeocodeAddress, GeocodePlace};
pub use field::{Field, FormKind, ParseFieldError};
pub use prospect::ProspectId;
pub use record::FormRecord;
pub use validation::{ValidationErrors, ValidationIssue};
