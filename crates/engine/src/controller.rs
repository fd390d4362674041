//! Form State Controller.
//!
//! Owns the field values and validation state of one form instance, and
//! turns a submit or edit-mode load into calls on a [`ProspectGateway`].
//!
//! Network failures never escape as panics or unhandled errors: they become
//! a user-visible [`Notice`] and a typed error for the caller to act on
//! (stay on the form, or navigate back after a failed load).
//!
//! Both network operations come in two flavours:
//!
//! - `submit` / `load`: async, for callers that can await in place (CLI,
//!   tests)
//! - `prepare_submission` + `finish_submission`, `begin_load` +
//!   `finish_load`: synchronous halves for an event loop that runs the
//!   request on a background task and applies the outcome when it arrives

use chrono::{DateTime, Utc};
use groundwork_api::ApiError;
use groundwork_types::{AddressSuggestion, Field, FormKind, FormRecord, ProspectId, ValidationErrors};
use groundwork_util::MessageKey;
use groundwork_util::dates::contact_timestamp;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::ProspectGateway;
use crate::validation::validate_record;

/// Where a form's submission goes and what happens after it succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Public contact or quote form: `POST /prospect/contact`.
    Contact,
    /// Admin creation of a prospect: `POST /prospect/manage`.
    AdminCreate,
    /// Admin edit of an existing prospect: `PUT /prospect/manage/{id}`.
    AdminEdit(ProspectId),
}

impl FormMode {
    /// Creation forms start over after a successful submit; edit forms keep
    /// what was saved.
    pub fn resets_after_submit(&self) -> bool {
        !matches!(self, Self::AdminEdit(_))
    }

    pub fn prospect_id(&self) -> Option<&ProspectId> {
        match self {
            Self::AdminEdit(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking, user-visible message raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: MessageKey,
}

impl Notice {
    pub fn info(message: MessageKey) -> Self {
        Self {
            kind: NoticeKind::Info,
            message,
        }
    }

    pub fn error(message: MessageKey) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields: {0}")]
    Invalid(ValidationErrors),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("submission failed: {0}")]
    Remote(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("prospect {0} returned no record")]
    Missing(ProspectId),
    #[error("loading prospect failed: {0}")]
    Remote(#[from] ApiError),
}

/// A validated payload ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Contact(Value),
    Create(Value),
    Update(ProspectId, Value),
}

impl Submission {
    pub fn payload(&self) -> &Value {
        match self {
            Self::Contact(payload) | Self::Create(payload) | Self::Update(_, payload) => payload,
        }
    }

    /// Send the payload to the matching endpoint. 2xx means success.
    pub async fn dispatch(&self, gateway: &dyn ProspectGateway) -> Result<(), ApiError> {
        match self {
            Self::Contact(payload) => gateway.submit_contact(payload).await,
            Self::Create(payload) => gateway.create(payload).await.map(|_| ()),
            Self::Update(id, payload) => gateway.update(id, payload).await.map(|_| ()),
        }
    }
}

/// State of one contact, quote or prospect form.
#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    record: FormRecord,
    errors: ValidationErrors,
    loading: bool,
    load_started: bool,
    submitting: bool,
    notice: Option<Notice>,
}

impl FormController {
    pub fn new(kind: FormKind, mode: FormMode) -> Self {
        Self {
            mode,
            record: FormRecord::new(kind),
            errors: ValidationErrors::new(),
            loading: false,
            load_started: false,
            submitting: false,
            notice: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.record.kind()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn value(&self, field: Field) -> &str {
        self.record.get(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Hand the pending notice to the view and forget it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Overwrite `field` and clear any validation error recorded for it.
    ///
    /// Fields that are not part of this form's variant are ignored.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if !self.record.set(field, value) {
            warn!(%field, kind = self.kind().as_str(), "ignoring field outside the form schema");
            return;
        }
        self.errors.clear_field(field);
    }

    /// Commit a chosen address suggestion into the four address fields.
    pub fn apply_address(&mut self, suggestion: &AddressSuggestion) {
        self.set_field(Field::Address, suggestion.street());
        self.set_field(Field::City, suggestion.city.as_str());
        self.set_field(Field::State, suggestion.state.as_str());
        self.set_field(Field::Postal, suggestion.postal.as_str());
    }

    /// Recompute validation errors for the whole record.
    pub fn validate(&mut self) -> ValidationErrors {
        self.errors = validate_record(&self.record);
        self.errors.clone()
    }

    /// Validate and, if valid, build the payload to send.
    ///
    /// An invalid form raises the "complete required fields" notice and no
    /// request must be made.
    pub fn prepare_submission(&mut self, now: DateTime<Utc>) -> Result<Submission, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(%errors, "submission blocked by validation");
            self.notice = Some(Notice::error(MessageKey::IncompleteForm));
            return Err(SubmitError::Invalid(errors));
        }

        self.submitting = true;
        let submission = match &self.mode {
            FormMode::Contact => Submission::Contact(self.creation_payload(now)),
            FormMode::AdminCreate => Submission::Create(self.creation_payload(now)),
            FormMode::AdminEdit(id) => Submission::Update(id.clone(), Value::Object(self.record.to_json_map())),
        };
        Ok(submission)
    }

    /// Apply the outcome of a dispatched submission.
    pub fn finish_submission(&mut self, outcome: Result<(), ApiError>) -> Result<(), SubmitError> {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!(kind = self.kind().as_str(), "form submitted");
                if self.mode.resets_after_submit() {
                    self.record.clear();
                    self.errors = ValidationErrors::new();
                }
                self.notice = Some(Notice::info(MessageKey::SubmitSucceeded));
                Ok(())
            }
            Err(error) => {
                warn!(%error, kind = self.kind().as_str(), "form submission failed");
                self.notice = Some(Notice::error(MessageKey::SubmitFailed));
                Err(SubmitError::Remote(error))
            }
        }
    }

    /// Validate and submit through `gateway`.
    ///
    /// `Ok` means the caller should navigate away.
    pub async fn submit(&mut self, gateway: &dyn ProspectGateway) -> Result<(), SubmitError> {
        let submission = self.prepare_submission(Utc::now())?;
        let outcome = submission.dispatch(gateway).await;
        self.finish_submission(outcome)
    }

    /// Start the one edit-mode load, returning the id to fetch.
    ///
    /// Returns `None` for creation forms and on every call after the first.
    pub fn begin_load(&mut self) -> Option<ProspectId> {
        if self.load_started {
            return None;
        }
        let id = self.mode.prospect_id()?.clone();
        self.load_started = true;
        self.loading = true;
        Some(id)
    }

    /// Apply a fetched record. On failure the record stays untouched and the
    /// caller should navigate back.
    pub fn finish_load(&mut self, outcome: Result<Value, ApiError>) -> Result<(), LoadError> {
        self.loading = false;
        let result = match outcome {
            Ok(Value::Object(remote)) => {
                self.record.populate_from_json(&remote);
                self.errors = ValidationErrors::new();
                return Ok(());
            }
            Ok(_) => {
                let id = self.mode.prospect_id().cloned().unwrap_or_else(|| ProspectId::new(""));
                LoadError::Missing(id)
            }
            Err(error) => LoadError::Remote(error),
        };
        warn!(error = %result, "prospect load failed");
        self.notice = Some(Notice::error(MessageKey::LoadFailed));
        Err(result)
    }

    /// Perform the edit-mode load, once. A no-op for creation forms.
    pub async fn load(&mut self, gateway: &dyn ProspectGateway) -> Result<(), LoadError> {
        let Some(id) = self.begin_load() else {
            return Ok(());
        };
        let outcome = gateway.fetch(&id).await;
        self.finish_load(outcome)
    }

    fn creation_payload(&self, now: DateTime<Utc>) -> Value {
        let stamp = contact_timestamp(now);
        let mut payload = self.record.to_json_map();
        payload.insert("contactDate".into(), Value::String(stamp.clone()));
        payload.insert(
            "metadata".into(),
            json!({ "contactDate": stamp, "formType": self.kind().as_str() }),
        );
        Value::Object(payload)
    }
}
