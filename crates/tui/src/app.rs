//! Application state and input handling.
//!
//! `App` is a synchronous state machine. Key presses and completed background
//! work come in; [`Effect`]s describing remote calls go out. The runtime
//! executes effects on spawned tasks and feeds their [`Outcome`]s back through
//! [`App::apply_outcome`], so every mutation happens on the event loop.

use std::sync::Arc;

use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use groundwork_api::ApiError;
use groundwork_engine::{
    AddressEvent, ClientTable, Column, FormMode, FormSession, Geocoder, Notice, SubmitError, Submission,
};
use groundwork_types::{Field, FormKind, ProspectId};
use groundwork_util::{Localizer, MessageKey, SiteConfig};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::ui::text_input::TextInputState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Contact,
    Quote,
    Admin,
    NewProspect,
    EditProspect(ProspectId),
}

/// Top navigation entries, in display order.
pub const NAV_ITEMS: [(MessageKey, Route); 4] = [
    (MessageKey::NavHome, Route::Home),
    (MessageKey::NavContact, Route::Contact),
    (MessageKey::NavQuote, Route::Quote),
    (MessageKey::NavAdmin, Route::Admin),
];

/// Remote work requested by the state machine.
///
/// Form work carries the generation of the form that asked for it; the
/// matching [`Outcome`] is dropped unless that same form is still open.
#[derive(Debug)]
pub enum Effect {
    Submit { form: u64, submission: Submission },
    LoadProspect { form: u64, id: ProspectId },
    ListProspects,
    DeleteProspect(ProspectId),
}

/// Result of an [`Effect`], delivered back to the event loop.
#[derive(Debug)]
pub enum Outcome {
    Submitted { form: u64, result: Result<(), ApiError> },
    Loaded { form: u64, result: Result<Value, ApiError> },
    Listed(Result<Vec<Value>, ApiError>),
    Deleted(Result<(), ApiError>),
}

/// An open form plus the editing state of its focused field.
pub struct FormView {
    pub session: FormSession,
    /// Distinguishes this form from every other one opened in the session.
    pub generation: u64,
    /// Index into the form's fields; one past the end is the submit button.
    pub focus: usize,
    pub editor: TextInputState,
    pub suggestion_cursor: usize,
    back: Route,
}

impl FormView {
    fn new(session: FormSession, generation: u64, back: Route) -> Self {
        let mut view = Self {
            session,
            generation,
            focus: 0,
            editor: TextInputState::new(),
            suggestion_cursor: 0,
            back,
        };
        view.sync_editor();
        view
    }

    pub fn fields(&self) -> &'static [Field] {
        self.session.controller().kind().fields()
    }

    /// `None` while the submit button is focused.
    pub fn focused_field(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    fn sync_editor(&mut self) {
        let text = self
            .focused_field()
            .map(|field| self.session.controller().value(field).to_string())
            .unwrap_or_default();
        self.editor = TextInputState::with_text(text);
    }

    fn set_focus(&mut self, focus: usize) {
        self.focus = focus.min(self.fields().len());
        self.sync_editor();
        match self.focused_field() {
            Some(field) => self.session.focus(field),
            None => self.session.hide_suggestions(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let slots = self.fields().len() + 1;
        let next = if forward { (self.focus + 1) % slots } else { (self.focus + slots - 1) % slots };
        self.set_focus(next);
    }

    pub fn suggestions_open(&self) -> bool {
        self.focused_field() == Some(Field::Address) && self.session.suggestions_visible()
    }

    /// Push the editor's text into the record.
    fn commit_edit(&mut self) {
        if let Some(field) = self.focused_field() {
            self.session.input(field, self.editor.input());
        }
    }
}

#[derive(Default)]
pub struct AdminView {
    pub table: ClientTable,
    pub filter: TextInputState,
    pub filtering: bool,
    pub loading: bool,
    pub confirm_delete: Option<ProspectId>,
}

impl AdminView {
    fn new(localizer: &Localizer) -> Self {
        let label = |field: Field| Column::new(field.as_str(), localizer.field_label(field));
        let columns = vec![
            label(Field::Name),
            label(Field::LastName),
            label(Field::Email),
            label(Field::Phone),
            label(Field::City),
            Column::new("contactDate", localizer.text(MessageKey::ColumnContactDate)),
        ];
        Self {
            table: ClientTable::new(columns),
            ..Default::default()
        }
    }

    fn selected_id(&self) -> Option<ProspectId> {
        self.table.selected_row().and_then(ProspectId::from_record)
    }
}

pub struct App {
    pub config: SiteConfig,
    pub localizer: Localizer,
    pub route: Route,
    pub nav_cursor: usize,
    pub form: Option<FormView>,
    pub admin: AdminView,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    forms_opened: u64,
    geocoder: Arc<dyn Geocoder>,
    address_events: UnboundedSender<AddressEvent>,
}

impl App {
    pub fn new(config: SiteConfig, geocoder: Arc<dyn Geocoder>, address_events: UnboundedSender<AddressEvent>) -> Self {
        let localizer = Localizer::new(config.locale);
        let admin = AdminView::new(&localizer);
        Self {
            config,
            localizer,
            route: Route::Home,
            nav_cursor: 0,
            form: None,
            admin,
            notice: None,
            should_quit: false,
            forms_opened: 0,
            geocoder,
            address_events,
        }
    }

    pub fn text(&self, key: MessageKey) -> &'static str {
        self.localizer.text(key)
    }

    /// Switch screens, returning any loads the new screen needs.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        debug!(?route, "navigating");
        self.form = None;
        self.admin.confirm_delete = None;
        let mut effects = Vec::new();

        match &route {
            Route::Home => {}
            Route::Contact => self.open_form(FormKind::Contact, FormMode::Contact, Route::Home),
            Route::Quote => self.open_form(FormKind::Quote, FormMode::Contact, Route::Home),
            Route::Admin => {
                self.admin.loading = true;
                effects.push(Effect::ListProspects);
            }
            Route::NewProspect => self.open_form(FormKind::Quote, FormMode::AdminCreate, Route::Admin),
            Route::EditProspect(id) => {
                self.open_form(FormKind::Quote, FormMode::AdminEdit(id.clone()), Route::Admin);
                if let Some(form) = self.form.as_mut()
                    && let Some(id) = form.session.controller_mut().begin_load()
                {
                    effects.push(Effect::LoadProspect {
                        form: form.generation,
                        id,
                    });
                }
            }
        }

        if let Some(index) = NAV_ITEMS.iter().position(|(_, nav)| *nav == route) {
            self.nav_cursor = index;
        }
        self.route = route;
        effects
    }

    fn open_form(&mut self, kind: FormKind, mode: FormMode, back: Route) {
        self.forms_opened += 1;
        let session = FormSession::new(kind, mode, Arc::clone(&self.geocoder), self.address_events.clone());
        self.form = Some(FormView::new(session, self.forms_opened, back));
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            _ => Vec::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notice = None;
            }
            return Vec::new();
        }

        let effects = match self.route {
            Route::Home => self.handle_home_key(key),
            Route::Admin => self.handle_admin_key(key),
            _ => self.handle_form_key(key),
        };
        self.collect_notice();
        effects
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Left => {
                self.nav_cursor = self.nav_cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Right => {
                self.nav_cursor = (self.nav_cursor + 1).min(NAV_ITEMS.len() - 1);
                Vec::new()
            }
            KeyCode::Enter => self.navigate(NAV_ITEMS[self.nav_cursor].1.clone()),
            KeyCode::Char(digit @ '1'..='4') => {
                let index = digit as usize - '1' as usize;
                self.navigate(NAV_ITEMS[index].1.clone())
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };

        if form.session.controller().is_loading() || form.session.controller().is_submitting() {
            if key.code == KeyCode::Esc {
                let back = form.back.clone();
                return self.navigate(back);
            }
            return Vec::new();
        }

        if form.suggestions_open() {
            let count = form.session.suggestions().len();
            match key.code {
                KeyCode::Down => {
                    form.suggestion_cursor = (form.suggestion_cursor + 1).min(count.saturating_sub(1));
                    return Vec::new();
                }
                KeyCode::Up => {
                    form.suggestion_cursor = form.suggestion_cursor.saturating_sub(1);
                    return Vec::new();
                }
                KeyCode::Enter => {
                    if form.session.select_suggestion(form.suggestion_cursor) {
                        form.sync_editor();
                    }
                    return Vec::new();
                }
                KeyCode::Esc => {
                    form.session.hide_suggestions();
                    return Vec::new();
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                let back = form.back.clone();
                return self.navigate(back);
            }
            KeyCode::Tab | KeyCode::Down => form.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => form.move_focus(false),
            KeyCode::Enter => return self.submit_form(),
            KeyCode::Left => form.editor.move_left(),
            KeyCode::Right => form.editor.move_right(),
            KeyCode::Home => form.editor.move_home(),
            KeyCode::End => form.editor.move_end(),
            KeyCode::Backspace => {
                if form.editor.backspace() {
                    form.commit_edit();
                }
            }
            KeyCode::Delete => {
                if form.editor.delete() {
                    form.commit_edit();
                }
            }
            KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if form.focused_field().is_some() {
                    form.editor.insert_char(character);
                    form.commit_edit();
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn submit_form(&mut self) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match form.session.prepare_submission(Utc::now()) {
            Ok(submission) => vec![Effect::Submit {
                form: form.generation,
                submission,
            }],
            Err(SubmitError::Invalid(errors)) => {
                if let Some(first) = form.fields().iter().position(|field| errors.contains(*field)) {
                    form.set_focus(first);
                }
                Vec::new()
            }
            Err(_) => Vec::new(),
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if let Some(id) = self.admin.confirm_delete.take() {
            if matches!(key.code, KeyCode::Char('y' | 'Y' | 's' | 'S')) {
                self.admin.loading = true;
                return vec![Effect::DeleteProspect(id)];
            }
            return Vec::new();
        }

        if self.admin.filtering {
            match key.code {
                KeyCode::Enter => self.admin.filtering = false,
                KeyCode::Esc => {
                    self.admin.filtering = false;
                    self.admin.filter.clear();
                }
                KeyCode::Backspace => {
                    self.admin.filter.backspace();
                }
                KeyCode::Left => self.admin.filter.move_left(),
                KeyCode::Right => self.admin.filter.move_right(),
                KeyCode::Char(character) => self.admin.filter.insert_char(character),
                _ => return Vec::new(),
            }
            let filter = self.admin.filter.input().to_string();
            self.admin.table.set_filter(filter);
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc => return self.navigate(Route::Home),
            KeyCode::Down => self.admin.table.select_next(),
            KeyCode::Up => self.admin.table.select_previous(),
            KeyCode::Char('/') => self.admin.filtering = true,
            KeyCode::Char('s') => {
                let columns = self.admin.table.columns().len();
                let next = self.admin.table.sort().map_or(0, |(column, _)| (column + 1) % columns);
                self.admin.table.sort_by(next);
            }
            KeyCode::Char('r') => {
                if let Some((column, _)) = self.admin.table.sort() {
                    self.admin.table.sort_by(column);
                }
            }
            KeyCode::Char('n') => return self.navigate(Route::NewProspect),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.admin.selected_id() {
                    return self.navigate(Route::EditProspect(id));
                }
            }
            KeyCode::Char('d') => self.admin.confirm_delete = self.admin.selected_id(),
            _ => {}
        }
        Vec::new()
    }

    /// Route an address pipeline event to the open form, if any.
    pub fn handle_address_event(&mut self, event: AddressEvent) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        let changed = form.session.handle_address_event(event);
        if changed {
            form.suggestion_cursor = 0;
        }
        changed
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        let effects = match outcome {
            Outcome::Submitted { form, result } => self.finish_submission(form, result),
            Outcome::Loaded { form, result } => self.finish_load(form, result),
            Outcome::Listed(result) => {
                self.admin.loading = false;
                let rows = result.unwrap_or_else(|error| {
                    warn!(%error, "listing prospects failed");
                    Vec::new()
                });
                self.admin.table.set_rows(rows);
                Vec::new()
            }
            Outcome::Deleted(Ok(())) => vec![Effect::ListProspects],
            Outcome::Deleted(Err(error)) => {
                warn!(%error, "deleting prospect failed");
                self.admin.loading = false;
                self.notice = Some(Notice::error(MessageKey::DeleteFailed));
                Vec::new()
            }
        };
        self.collect_notice();
        effects
    }

    /// The open form, if it is the one with `generation`.
    fn form_with_generation(&mut self, generation: u64) -> Option<&mut FormView> {
        self.form.as_mut().filter(|form| form.generation == generation)
    }

    fn finish_submission(&mut self, generation: u64, result: Result<(), ApiError>) -> Vec<Effect> {
        let Some(form) = self
            .form_with_generation(generation)
            .filter(|form| form.session.controller().is_submitting())
        else {
            debug!(generation, "dropping submission result for a closed form");
            return Vec::new();
        };
        let finished = form.session.finish_submission(result);
        self.collect_notice();
        match finished {
            Ok(()) => {
                let back = form_back(&self.form);
                self.navigate(back)
            }
            Err(_) => Vec::new(),
        }
    }

    fn finish_load(&mut self, generation: u64, result: Result<Value, ApiError>) -> Vec<Effect> {
        let Some(form) = self
            .form_with_generation(generation)
            .filter(|form| form.session.controller().is_loading())
        else {
            debug!(generation, "dropping loaded record for a closed form");
            return Vec::new();
        };
        match form.session.finish_load(result) {
            Ok(()) => {
                form.sync_editor();
                Vec::new()
            }
            Err(_) => {
                self.collect_notice();
                self.navigate(Route::Admin)
            }
        }
    }

    fn collect_notice(&mut self) {
        if let Some(notice) = self.form.as_mut().and_then(|form| form.session.controller_mut().take_notice()) {
            self.notice = Some(notice);
        }
    }
}

fn form_back(form: &Option<FormView>) -> Route {
    form.as_ref().map_or(Route::Home, |form| form.back.clone())
}
