//! Form behaviour for the Groundwork lead-intake client.
//!
//! - [`FormController`]: field values, validation and the submit/load
//!   lifecycle of one form
//! - [`AddressAutocomplete`]: debounced address lookups feeding a
//!   suggestion list
//! - [`FormSession`]: the two wired together for one open form
//! - [`ClientTable`]: the admin prospect list view model
//!
//! Remote calls go through the [`ProspectGateway`] and [`Geocoder`] traits,
//! implemented for the HTTP clients in `groundwork-api`.

pub mod address;
pub mod controller;
pub mod debounce;
pub mod gateway;
pub mod session;
pub mod table;
pub mod validation;

pub use address::{ADDRESS_QUIET_PERIOD, AddressAutocomplete, AddressEvent, LookupState, MIN_QUERY_CHARS, normalize_place};
pub use controller::{FormController, FormMode, LoadError, Notice, NoticeKind, SubmitError, Submission};
pub use debounce::DebounceTimer;
pub use gateway::{Geocoder, ProspectGateway};
pub use session::FormSession;
pub use table::{ClientTable, Column, SortDirection};
pub use validation::{is_valid_email, is_valid_phone, validate_record};
