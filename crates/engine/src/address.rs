//! Address Suggestion Pipeline.
//!
//! Turns keystrokes in the address field into a short list of geocoded
//! candidates without flooding the lookup service.
//!
//! ```text
//! Idle ──keystroke ≥3 chars──▶ Scheduled ──500 ms quiet──▶ Querying ──▶ Resolved | Failed
//!   ▲                              │ keystroke: reschedule                    │
//!   └──────── keystroke <3 chars ◀─┴──────────────────────────────────────────┘
//! ```
//!
//! The pipeline never blocks. Timer firings and lookup completions arrive as
//! [`AddressEvent`]s on the channel given at construction; the owner feeds
//! them back through [`AddressAutocomplete::handle_event`] from its event
//! loop, so all state changes happen on that loop.
//!
//! Only the most recently issued lookup may update the list. A completion
//! from an older request, or one that was invalidated by clearing the field
//! or committing a suggestion, is discarded. Lookup sequence numbers are
//! unique across all pipelines, so forms that share one event channel never
//! accept each other's completions.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use groundwork_api::ApiError;
use groundwork_types::{AddressSuggestion, GeocodePlace};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::debounce::DebounceTimer;
use crate::gateway::Geocoder;

/// Quiet period after the last keystroke before a lookup is issued.
pub const ADDRESS_QUIET_PERIOD: Duration = Duration::from_millis(500);
/// Minimum trimmed length of the address text that triggers a lookup.
pub const MIN_QUERY_CHARS: usize = 3;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Scheduled,
    Querying,
    Resolved,
    Failed,
}

/// Asynchronous results delivered back to the pipeline's owner.
#[derive(Debug)]
pub enum AddressEvent {
    /// The debounce timer identified by `ticket` fired for `query`.
    QuietPeriodElapsed { ticket: u64, query: String },
    /// The lookup numbered `sequence` completed.
    LookupFinished {
        sequence: u64,
        outcome: Result<Vec<GeocodePlace>, ApiError>,
    },
}

/// Normalize one provider result.
///
/// City prefers `city`, then `town`, then `village`; absent values become
/// empty strings.
pub fn normalize_place(place: GeocodePlace) -> AddressSuggestion {
    let GeocodePlace { display_name, address } = place;
    let city = address
        .city
        .or(address.town)
        .or(address.village)
        .unwrap_or_default();
    AddressSuggestion {
        label: display_name,
        city,
        state: address.state.unwrap_or_default(),
        postal: address.postcode.unwrap_or_default(),
    }
}

pub struct AddressAutocomplete {
    geocoder: Arc<dyn Geocoder>,
    events: UnboundedSender<AddressEvent>,
    timer: DebounceTimer,
    quiet_period: Duration,
    state: LookupState,
    suggestions: Vec<AddressSuggestion>,
    visible: bool,
    issued: u64,
    accepting: Option<u64>,
}

impl AddressAutocomplete {
    pub fn new(geocoder: Arc<dyn Geocoder>, events: UnboundedSender<AddressEvent>) -> Self {
        Self {
            geocoder,
            events,
            timer: DebounceTimer::new(),
            quiet_period: ADDRESS_QUIET_PERIOD,
            state: LookupState::Idle,
            suggestions: Vec::new(),
            visible: false,
            issued: 0,
            accepting: None,
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// React to new text in the address field.
    ///
    /// Any pending lookup is cancelled. Text of at least
    /// [`MIN_QUERY_CHARS`] (trimmed) schedules a new one; shorter text
    /// clears and hides the list immediately.
    pub fn on_text_changed(&mut self, text: &str) {
        self.timer.cancel();

        if !meets_threshold(text) {
            self.suggestions.clear();
            self.visible = false;
            self.accepting = None;
            self.state = LookupState::Idle;
            return;
        }

        let events = self.events.clone();
        let query = text.to_string();
        self.timer.schedule(self.quiet_period, move |ticket| {
            let _ = events.send(AddressEvent::QuietPeriodElapsed { ticket, query });
        });
        self.state = LookupState::Scheduled;
    }

    /// Re-show the kept list when the field regains focus with enough text.
    pub fn on_focus(&mut self, text: &str) {
        if meets_threshold(text) && !self.suggestions.is_empty() {
            self.visible = true;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Pick the suggestion at `index`, hiding the list but keeping it.
    ///
    /// A pending timer and any in-flight lookup are dropped so they cannot
    /// reopen the list over the committed address.
    pub fn select(&mut self, index: usize) -> Option<AddressSuggestion> {
        let suggestion = self.suggestions.get(index)?.clone();
        self.timer.cancel();
        self.accepting = None;
        self.visible = false;
        self.state = LookupState::Idle;
        Some(suggestion)
    }

    /// Forget everything, e.g. after the form was submitted and cleared.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.suggestions.clear();
        self.visible = false;
        self.accepting = None;
        self.state = LookupState::Idle;
    }

    /// Apply an event produced by this pipeline. Returns whether anything
    /// visible changed.
    pub fn handle_event(&mut self, event: AddressEvent) -> bool {
        match event {
            AddressEvent::QuietPeriodElapsed { ticket, query } => {
                if !self.timer.accept(ticket) {
                    debug!(ticket, "ignoring superseded debounce timer");
                    return false;
                }
                self.issue_lookup(query);
                true
            }
            AddressEvent::LookupFinished { sequence, outcome } => {
                if self.accepting != Some(sequence) {
                    debug!(sequence, latest = self.issued, "discarding stale address lookup");
                    return false;
                }
                self.accepting = None;
                self.apply_outcome(outcome);
                true
            }
        }
    }

    fn issue_lookup(&mut self, query: String) {
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        self.issued = sequence;
        self.accepting = Some(sequence);
        self.state = LookupState::Querying;

        let geocoder = Arc::clone(&self.geocoder);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = geocoder.search(&query).await;
            let _ = events.send(AddressEvent::LookupFinished { sequence, outcome });
        });
    }

    fn apply_outcome(&mut self, outcome: Result<Vec<GeocodePlace>, ApiError>) {
        let settled = match outcome {
            Ok(places) => {
                self.suggestions = places.into_iter().map(normalize_place).collect();
                self.visible = !self.suggestions.is_empty();
                LookupState::Resolved
            }
            Err(error) => {
                warn!(%error, "address lookup failed");
                LookupState::Failed
            }
        };
        self.state = if self.timer.is_pending() { LookupState::Scheduled } else { settled };
    }
}

fn meets_threshold(text: &str) -> bool {
    text.trim().chars().count() >= MIN_QUERY_CHARS
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use groundwork_types::GeocodeAddress;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::{Instant, advance};

    use super::*;

    #[derive(Default)]
    struct FakeGeocoder {
        queries: Mutex<Vec<String>>,
    }

    impl FakeGeocoder {
        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn search(&self, query: &str) -> Result<Vec<GeocodePlace>, ApiError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(vec![place(&format!("{query} St, Anytown, CA"), Some("Anytown"))])
        }
    }

    fn place(label: &str, city: Option<&str>) -> GeocodePlace {
        GeocodePlace {
            display_name: label.into(),
            address: GeocodeAddress {
                city: city.map(str::to_string),
                state: Some("CA".into()),
                postcode: Some("90210".into()),
                ..Default::default()
            },
        }
    }

    fn pipeline(geocoder: Arc<FakeGeocoder>) -> (AddressAutocomplete, UnboundedReceiver<AddressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (AddressAutocomplete::new(geocoder, sender), receiver)
    }

    #[test]
    fn normalize_prefers_city_then_town_then_village() {
        let mut raw = place("1 Elm, Smallville", None);
        raw.address.village = Some("Smallville".into());
        raw.address.town = Some("Townsend".into());
        assert_eq!(normalize_place(raw.clone()).city, "Townsend");

        raw.address.town = None;
        assert_eq!(normalize_place(raw.clone()).city, "Smallville");

        raw.address = GeocodeAddress::default();
        let bare = normalize_place(raw);
        assert_eq!((bare.city.as_str(), bare.state.as_str(), bare.postal.as_str()), ("", "", ""));
        assert_eq!(bare.label, "1 Elm, Smallville");
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_issue_one_lookup_after_quiet_period() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, mut events) = pipeline(geocoder.clone());
        let start = Instant::now();

        autocomplete.on_text_changed("123");
        advance(Duration::from_millis(100)).await;
        autocomplete.on_text_changed("123 M");
        advance(Duration::from_millis(100)).await;
        autocomplete.on_text_changed("123 Main");
        assert_eq!(autocomplete.state(), LookupState::Scheduled);

        let event = events.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(700) && elapsed < Duration::from_millis(710), "{elapsed:?}");
        let AddressEvent::QuietPeriodElapsed { ref query, .. } = event else {
            panic!("expected the debounce timer to fire first");
        };
        assert_eq!(query, "123 Main");

        assert!(autocomplete.handle_event(event));
        assert_eq!(autocomplete.state(), LookupState::Querying);

        let finished = events.recv().await.unwrap();
        assert!(autocomplete.handle_event(finished));
        assert_eq!(geocoder.queries(), vec!["123 Main".to_string()]);
        assert_eq!(autocomplete.state(), LookupState::Resolved);
        assert!(autocomplete.is_visible());
        assert_eq!(autocomplete.suggestions()[0].city, "Anytown");

        advance(Duration::from_secs(2)).await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn short_text_schedules_nothing_and_hides() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, mut events) = pipeline(geocoder.clone());

        autocomplete.on_text_changed("12");
        assert_eq!(autocomplete.state(), LookupState::Idle);
        assert!(!autocomplete.is_visible());

        advance(Duration::from_secs(1)).await;
        assert!(events.try_recv().is_err());
        assert!(geocoder.queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shrinking_below_threshold_cancels_and_clears() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, mut events) = pipeline(geocoder.clone());

        autocomplete.on_text_changed("Main");
        let fired = events.recv().await.unwrap();
        autocomplete.handle_event(fired);
        let finished = events.recv().await.unwrap();
        autocomplete.handle_event(finished);
        assert_eq!(autocomplete.suggestions().len(), 1);

        autocomplete.on_text_changed("Ma");
        assert!(autocomplete.suggestions().is_empty());
        assert!(!autocomplete.is_visible());
        assert_eq!(autocomplete.state(), LookupState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookup_keeps_previous_list() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, mut events) = pipeline(geocoder);
        autocomplete.on_text_changed("Main");
        let fired = events.recv().await.unwrap();
        autocomplete.handle_event(fired);
        let finished = events.recv().await.unwrap();
        autocomplete.handle_event(finished);
        autocomplete.hide();

        autocomplete.on_text_changed("Main St");
        let fired = events.recv().await.unwrap();
        autocomplete.handle_event(fired);
        let sequence = autocomplete.issued;
        // Swallow the real completion and feed a failure for the same lookup.
        let _ = events.recv().await.unwrap();
        autocomplete.handle_event(AddressEvent::LookupFinished {
            sequence,
            outcome: Err(ApiError::Status {
                status: 500,
                body: String::new(),
            }),
        });

        assert_eq!(autocomplete.state(), LookupState::Failed);
        assert_eq!(autocomplete.suggestions().len(), 1);
        assert!(!autocomplete.is_visible());
    }

    #[tokio::test]
    async fn stale_completions_are_discarded() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, _events) = pipeline(geocoder);
        autocomplete.issue_lookup("first".into());
        let first = autocomplete.issued;
        autocomplete.issue_lookup("second".into());
        let second = autocomplete.issued;

        let newer = AddressEvent::LookupFinished {
            sequence: second,
            outcome: Ok(vec![place("Second St, B", Some("B"))]),
        };
        let older = AddressEvent::LookupFinished {
            sequence: first,
            outcome: Ok(vec![place("First St, A", Some("A"))]),
        };
        assert!(autocomplete.handle_event(newer));
        assert!(!autocomplete.handle_event(older));
        assert_eq!(autocomplete.suggestions()[0].city, "B");
    }

    #[tokio::test]
    async fn pipelines_sharing_a_channel_ignore_each_other() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (sender, _receiver) = mpsc::unbounded_channel();
        let mut closed = AddressAutocomplete::new(geocoder.clone(), sender.clone());
        let mut open = AddressAutocomplete::new(geocoder, sender);
        closed.issue_lookup("OLD street".into());
        open.issue_lookup("NEW avenue".into());
        assert_ne!(closed.issued, open.issued);

        let late = AddressEvent::LookupFinished {
            sequence: closed.issued,
            outcome: Ok(vec![place("OLD street, Town, CA", Some("Town"))]),
        };
        assert!(!open.handle_event(late));
        let own = AddressEvent::LookupFinished {
            sequence: open.issued,
            outcome: Ok(vec![place("NEW avenue, Town, CA", Some("Town"))]),
        };
        assert!(open.handle_event(own));
        assert_eq!(open.suggestions()[0].label, "NEW avenue, Town, CA");
    }

    #[tokio::test]
    async fn select_hides_but_keeps_list_and_focus_reopens() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let (mut autocomplete, _events) = pipeline(geocoder);
        autocomplete.issue_lookup("123 Main".into());
        let sequence = autocomplete.issued;
        autocomplete.handle_event(AddressEvent::LookupFinished {
            sequence,
            outcome: Ok(vec![place("123 Main St, Anytown, CA", Some("Anytown"))]),
        });
        assert!(autocomplete.is_visible());

        let chosen = autocomplete.select(0).unwrap();
        assert_eq!(chosen.street(), "123 Main St");
        assert!(!autocomplete.is_visible());
        assert_eq!(autocomplete.suggestions().len(), 1);
        assert!(autocomplete.select(5).is_none());

        autocomplete.on_focus("12");
        assert!(!autocomplete.is_visible());
        autocomplete.on_focus("123 Main St");
        assert!(autocomplete.is_visible());
    }
}
