//! One open form: field state plus, when the form has an address field,
//! the address suggestion pipeline wired to it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use groundwork_api::ApiError;
use groundwork_types::{AddressSuggestion, Field, FormKind};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::address::{AddressAutocomplete, AddressEvent};
use crate::controller::{FormController, FormMode, LoadError, Submission, SubmitError};
use crate::gateway::{Geocoder, ProspectGateway};

pub struct FormSession {
    controller: FormController,
    autocomplete: AddressAutocomplete,
}

impl FormSession {
    pub fn new(
        kind: FormKind,
        mode: FormMode,
        geocoder: Arc<dyn Geocoder>,
        events: UnboundedSender<AddressEvent>,
    ) -> Self {
        Self {
            controller: FormController::new(kind, mode),
            autocomplete: AddressAutocomplete::new(geocoder, events),
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn autocomplete(&self) -> &AddressAutocomplete {
        &self.autocomplete
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        self.autocomplete.suggestions()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.autocomplete.is_visible()
    }

    /// User edited `field`. Address edits also drive the suggestion
    /// pipeline with the raw text.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if field == Field::Address && self.controller.kind().has_field(Field::Address) {
            self.autocomplete.on_text_changed(&value);
        }
        self.controller.set_field(field, value);
    }

    /// Focus moved to `field`.
    pub fn focus(&mut self, field: Field) {
        if field == Field::Address {
            let text = self.controller.value(Field::Address).to_string();
            self.autocomplete.on_focus(&text);
        } else {
            self.autocomplete.hide();
        }
    }

    pub fn hide_suggestions(&mut self) {
        self.autocomplete.hide();
    }

    /// Commit the suggestion at `index` into the address fields.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        match self.autocomplete.select(index) {
            Some(suggestion) => {
                self.controller.apply_address(&suggestion);
                true
            }
            None => false,
        }
    }

    pub fn handle_address_event(&mut self, event: AddressEvent) -> bool {
        self.autocomplete.handle_event(event)
    }

    pub fn prepare_submission(&mut self, now: DateTime<Utc>) -> Result<Submission, SubmitError> {
        self.controller.prepare_submission(now)
    }

    pub fn finish_submission(&mut self, outcome: Result<(), ApiError>) -> Result<(), SubmitError> {
        let result = self.controller.finish_submission(outcome);
        if result.is_ok() && self.controller.mode().resets_after_submit() {
            self.autocomplete.reset();
        }
        result
    }

    pub async fn submit(&mut self, gateway: &dyn ProspectGateway) -> Result<(), SubmitError> {
        let submission = self.prepare_submission(Utc::now())?;
        let outcome = submission.dispatch(gateway).await;
        self.finish_submission(outcome)
    }

    pub fn finish_load(&mut self, outcome: Result<Value, ApiError>) -> Result<(), LoadError> {
        self.controller.finish_load(outcome)
    }

    pub async fn load(&mut self, gateway: &dyn ProspectGateway) -> Result<(), LoadError> {
        self.controller.load(gateway).await
    }
}
