#![forbid(unsafe_code)]

//! Single-character input field.
//!
//! [`SingleCharField`] holds at most one unit (grapheme cluster) and
//! classifies every content change into one of four notifications,
//! delivered to a [`SingleCharObserver`]:
//!
//! | Change | Notification |
//! |---|---|
//! | exactly one unit assigned | `character_added` |
//! | more than one unit assigned | `character_added_with_overflow` (head kept, tail reported) |
//! | empty string assigned | `became_empty` (previous unit, or `""`) |
//! | backspace on an empty field | `underflowed` |
//!
//! # Invariants
//!
//! 1. The displayed content is always empty or exactly one unit.
//! 2. Every mutating call dispatches exactly one notification.
//! 3. On overflow, head + tail reconstructs the assigned string.
//!
//! # Example
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use monoglyph_widgets::{ChangeLog, FieldChange, SingleCharField};
//!
//! let log = Rc::new(RefCell::new(ChangeLog::new()));
//! let mut field = SingleCharField::new();
//! field.set_observer(&log);
//!
//! field.assign("hello");
//! assert_eq!(field.displayed_character(), "h");
//! assert_eq!(
//!     log.borrow().last().map(|entry| entry.change.clone()),
//!     Some(FieldChange::CharacterAddedWithOverflow {
//!         character: "h".into(),
//!         overflow: "ello".into(),
//!     })
//! );
//! ```

mod observer;

pub use observer::{ChangeLog, ChangeLogEntry, FieldChange, SingleCharObserver};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use monoglyph_core::event::{Event, KeyCode, KeyEvent};
use monoglyph_core::grapheme::{first_unit, split_first_unit, unit_count};

/// A text input that holds at most one unit.
///
/// Content is only ever changed through [`assign`](Self::assign) (directly or
/// via [`on_user_edit`](Self::on_user_edit) / [`handle_event`](Self::handle_event))
/// and [`handle_backspace`](Self::handle_backspace).
#[derive(Debug, Default)]
pub struct SingleCharField {
    /// What the user sees: empty or one unit.
    displayed: String,
    /// Last string passed to `assign`, untruncated.
    raw: String,
    observer: Option<Weak<RefCell<dyn SingleCharObserver>>>,
}

impl SingleCharField {
    /// Create an empty field with no observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer.
    ///
    /// The field keeps only a weak reference: once the caller drops its last
    /// `Rc`, notifications stop.
    pub fn set_observer<O: SingleCharObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        let shared: Rc<RefCell<dyn SingleCharObserver>> = observer.clone();
        self.observer = Some(Rc::downgrade(&shared));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Whether an observer is attached and still alive.
    #[must_use]
    pub fn has_observer(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|observer| observer.strong_count() > 0)
    }

    /// The displayed content: `""` or exactly one unit.
    #[must_use]
    pub fn displayed_character(&self) -> &str {
        &self.displayed
    }

    /// The last string passed to [`assign`](Self::assign), untruncated.
    ///
    /// This is **not** the displayed content. After `assign("123")` this
    /// returns `"123"` while [`displayed_character`](Self::displayed_character)
    /// returns `"1"`. During a notification it still holds the value from
    /// before the change.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    /// Units currently displayed (0 or 1).
    #[must_use]
    pub fn unit_count(&self) -> usize {
        unit_count(&self.displayed)
    }

    /// Set the content, truncating to the first unit.
    ///
    /// Dispatches exactly one notification, chosen by the unit count of
    /// `new_value`, and returns it.
    pub fn assign(&mut self, new_value: &str) -> FieldChange {
        let change = match split_first_unit(new_value) {
            Some((head, "")) => {
                self.set_displayed(head);
                FieldChange::CharacterAdded {
                    character: head.to_owned(),
                }
            }
            Some((head, tail)) => {
                self.set_displayed(head);
                FieldChange::CharacterAddedWithOverflow {
                    character: head.to_owned(),
                    overflow: tail.to_owned(),
                }
            }
            None => {
                self.displayed.clear();
                FieldChange::BecameEmpty {
                    old_value: first_unit(&self.raw).to_owned(),
                }
            }
        };
        self.dispatch(&change);
        self.raw.clear();
        self.raw.push_str(new_value);
        change
    }

    /// The input surface's content changed through user interaction
    /// (typing, paste, autocomplete).
    pub fn on_user_edit(&mut self, current_raw_text: &str) -> FieldChange {
        self.assign(current_raw_text)
    }

    /// Backspace was pressed.
    ///
    /// On an empty field this fires `underflowed`. Otherwise the character is
    /// deleted as a user edit, which fires `became_empty` with it.
    pub fn handle_backspace(&mut self) -> FieldChange {
        let underflow = self.displayed.is_empty();
        if !underflow {
            return self.on_user_edit("");
        }
        let change = FieldChange::Underflowed;
        self.dispatch(&change);
        change
    }

    /// Handle an input event.
    ///
    /// Typed characters and pastes are appended to the displayed content (the
    /// cursor sits at the end) and the result goes through
    /// [`on_user_edit`](Self::on_user_edit), so typing into an occupied field
    /// overflows with the typed character as the tail.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_press_like() => self.handle_key(key),
            Event::Paste(paste) if !paste.text.is_empty() => {
                let surface = self.surface_with(&paste.text);
                self.on_user_edit(&surface);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.has_command_modifier() => {
                let mut buf = [0u8; 4];
                let surface = self.surface_with(c.encode_utf8(&mut buf));
                self.on_user_edit(&surface);
                true
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                true
            }
            _ => false,
        }
    }

    fn surface_with(&self, inserted: &str) -> String {
        let mut surface = String::with_capacity(self.displayed.len() + inserted.len());
        surface.push_str(&self.displayed);
        surface.push_str(inserted);
        surface
    }

    fn set_displayed(&mut self, unit: &str) {
        self.displayed.clear();
        self.displayed.push_str(unit);
    }

    fn dispatch(&self, change: &FieldChange) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "single_char.change",
            change = change.name(),
            displayed = %self.displayed
        );
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Ok(mut sink) = observer.try_borrow_mut() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                message = "single_char.observer_busy",
                change = change.name()
            );
            return;
        };
        change.deliver(&mut *sink, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoglyph_core::event::{KeyEventKind, Modifiers, PasteEvent};
    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    fn observed() -> (SingleCharField, Rc<RefCell<ChangeLog>>) {
        let log = Rc::new(RefCell::new(ChangeLog::new()));
        let mut field = SingleCharField::new();
        field.set_observer(&log);
        (field, log)
    }

    fn changes(log: &Rc<RefCell<ChangeLog>>) -> Vec<FieldChange> {
        log.borrow().changes().cloned().collect()
    }

    fn added(c: &str) -> FieldChange {
        FieldChange::CharacterAdded {
            character: c.into(),
        }
    }

    fn overflow(c: &str, rest: &str) -> FieldChange {
        FieldChange::CharacterAddedWithOverflow {
            character: c.into(),
            overflow: rest.into(),
        }
    }

    fn emptied(old: &str) -> FieldChange {
        FieldChange::BecameEmpty {
            old_value: old.into(),
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn starts_empty() {
        let field = SingleCharField::new();
        assert!(field.is_empty());
        assert_eq!(field.displayed_character(), "");
        assert_eq!(field.raw_value(), "");
        assert_eq!(field.unit_count(), 0);
        assert!(!field.has_observer());
    }

    #[test]
    fn assign_single_unit() {
        let (mut field, log) = observed();
        assert_eq!(field.assign("a"), added("a"));
        assert_eq!(field.displayed_character(), "a");
        assert_eq!(field.raw_value(), "a");
        assert_eq!(changes(&log), vec![added("a")]);
    }

    #[test]
    fn assign_overflow_keeps_head_and_reports_tail() {
        let (mut field, log) = observed();
        assert_eq!(field.assign("hello"), overflow("h", "ello"));
        assert_eq!(field.displayed_character(), "h");
        assert_eq!(field.raw_value(), "hello");
        assert_eq!(changes(&log), vec![overflow("h", "ello")]);
    }

    #[test]
    fn assign_grapheme_cluster_is_one_unit() {
        let (mut field, log) = observed();
        field.assign("e\u{301}");
        field.assign("👍🏽!");
        assert_eq!(
            changes(&log),
            vec![added("e\u{301}"), overflow("👍🏽", "!")]
        );
        assert_eq!(field.unit_count(), 1);
    }

    #[test]
    fn assign_empty_reports_previous_unit() {
        let (mut field, log) = observed();
        field.assign("X");
        assert_eq!(field.assign(""), emptied("X"));
        assert!(field.is_empty());
        assert_eq!(log.borrow().last().map(|e| e.change.clone()), Some(emptied("X")));
    }

    #[test]
    fn assign_empty_when_already_empty_reports_empty_old_value() {
        let (mut field, log) = observed();
        assert_eq!(field.assign(""), emptied(""));
        field.assign("q");
        field.assign("");
        assert_eq!(field.assign(""), emptied(""));
        assert_eq!(
            changes(&log),
            vec![emptied(""), added("q"), emptied("q"), emptied("")]
        );
    }

    #[test]
    fn emptying_after_overflow_reports_first_unit_of_raw_value() {
        let (mut field, _log) = observed();
        field.assign("xyz");
        assert_eq!(field.raw_value(), "xyz");
        assert_eq!(field.assign(""), emptied("x"));
    }

    #[test]
    fn backspace_on_empty_underflows_and_stays_empty() {
        let (mut field, log) = observed();
        assert_eq!(field.handle_backspace(), FieldChange::Underflowed);
        assert!(field.is_empty());
        assert_eq!(changes(&log), vec![FieldChange::Underflowed]);
    }

    #[test]
    fn backspace_on_occupied_empties_without_underflow() {
        let (mut field, log) = observed();
        field.assign("X");
        assert_eq!(field.handle_backspace(), emptied("X"));
        assert!(field.is_empty());
        assert_eq!(field.raw_value(), "");
        assert!(!changes(&log).contains(&FieldChange::Underflowed));

        assert_eq!(field.handle_backspace(), FieldChange::Underflowed);
    }

    #[test]
    fn exactly_one_notification_per_call() {
        let (mut field, log) = observed();
        field.assign("a");
        field.assign("bc");
        field.assign("");
        field.handle_backspace();
        field.on_user_edit("d");
        field.handle_backspace();
        assert_eq!(log.borrow().len(), 6);
    }

    #[test]
    fn observer_sees_new_display_and_previous_raw_value() {
        #[derive(Default)]
        struct Snapshot {
            seen: Vec<(String, String)>,
        }
        impl SingleCharObserver for Snapshot {
            fn character_added(&mut self, field: &SingleCharField, _: &str) {
                self.push(field);
            }
            fn character_added_with_overflow(&mut self, field: &SingleCharField, _: &str, _: &str) {
                self.push(field);
            }
            fn became_empty(&mut self, field: &SingleCharField, _: &str) {
                self.push(field);
            }
            fn underflowed(&mut self, field: &SingleCharField) {
                self.push(field);
            }
        }
        impl Snapshot {
            fn push(&mut self, field: &SingleCharField) {
                self.seen.push((
                    field.displayed_character().to_owned(),
                    field.raw_value().to_owned(),
                ));
            }
        }

        let snapshot = Rc::new(RefCell::new(Snapshot::default()));
        let mut field = SingleCharField::new();
        field.set_observer(&snapshot);
        field.assign("ab");
        field.assign("");
        assert_eq!(
            snapshot.borrow().seen,
            vec![
                ("a".to_owned(), String::new()),
                (String::new(), "ab".to_owned()),
            ]
        );
    }

    #[test]
    fn dropped_observer_disables_notifications() {
        let (mut field, log) = observed();
        assert!(field.has_observer());
        drop(log);
        assert!(!field.has_observer());
        assert_eq!(field.assign("z"), added("z"));
        assert_eq!(field.displayed_character(), "z");
    }

    #[test]
    fn busy_observer_is_skipped() {
        let (mut field, log) = observed();
        {
            let _held = log.borrow_mut();
            field.assign("a");
        }
        field.assign("b");
        assert_eq!(changes(&log), vec![added("b")]);
    }

    #[test]
    fn clear_observer_detaches() {
        let (mut field, log) = observed();
        field.clear_observer();
        field.assign("a");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn typing_into_empty_field_adds_character() {
        let (mut field, log) = observed();
        assert!(field.handle_event(&key(KeyCode::Char('k'))));
        assert_eq!(field.displayed_character(), "k");
        assert_eq!(changes(&log), vec![added("k")]);
    }

    #[test]
    fn typing_into_occupied_field_overflows_with_typed_character() {
        let (mut field, log) = observed();
        field.handle_event(&key(KeyCode::Char('a')));
        field.handle_event(&key(KeyCode::Char('b')));
        assert_eq!(field.displayed_character(), "a");
        assert_eq!(field.raw_value(), "ab");
        assert_eq!(changes(&log), vec![added("a"), overflow("a", "b")]);
    }

    #[test]
    fn paste_appends_to_surface() {
        let (mut field, log) = observed();
        assert!(field.handle_event(&Event::Paste(PasteEvent::new("hello"))));
        assert_eq!(field.displayed_character(), "h");
        assert!(!field.handle_event(&Event::Paste(PasteEvent::new(""))));
        assert_eq!(changes(&log), vec![overflow("h", "ello")]);
    }

    #[test]
    fn backspace_key_routes_to_handle_backspace() {
        let (mut field, log) = observed();
        assert!(field.handle_event(&key(KeyCode::Backspace)));
        field.handle_event(&key(KeyCode::Char('x')));
        field.handle_event(&key(KeyCode::Backspace));
        assert_eq!(
            changes(&log),
            vec![FieldChange::Underflowed, added("x"), emptied("x")]
        );
    }

    #[test]
    fn releases_commands_and_other_events_are_ignored() {
        let (mut field, log) = observed();
        let release = KeyEvent::new(KeyCode::Char('a')).with_kind(KeyEventKind::Release);
        assert!(!field.handle_event(&Event::Key(release)));
        let ctrl = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(!field.handle_event(&Event::Key(ctrl)));
        assert!(!field.handle_event(&key(KeyCode::Enter)));
        assert!(!field.handle_event(&Event::Focus(true)));
        assert!(!field.handle_event(&Event::Tick));
        assert!(log.borrow().is_empty());

        let shifted = KeyEvent::new(KeyCode::Char('A')).with_modifiers(Modifiers::SHIFT);
        assert!(field.handle_event(&Event::Key(shifted)));
        assert_eq!(field.displayed_character(), "A");
    }

    #[test]
    fn change_names_match_observer_methods() {
        assert_eq!(added("a").name(), "character_added");
        assert_eq!(overflow("a", "b").name(), "character_added_with_overflow");
        assert_eq!(emptied("").name(), "became_empty");
        assert_eq!(FieldChange::Underflowed.name(), "underflowed");
    }

    #[cfg(feature = "tracing")]
    #[derive(Default)]
    struct FieldTraceState {
        changes: Vec<String>,
        saw_busy_warning: bool,
    }

    #[cfg(feature = "tracing")]
    struct FieldTraceCapture {
        state: Arc<Mutex<FieldTraceState>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for FieldTraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            #[derive(Default)]
            struct Fields {
                message: Option<String>,
                change: Option<String>,
            }
            impl tracing::field::Visit for Fields {
                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    match field.name() {
                        "message" => self.message = Some(value.to_string()),
                        "change" => self.change = Some(value.to_string()),
                        _ => {}
                    }
                }

                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    let text = format!("{value:?}").trim_matches('"').to_string();
                    match field.name() {
                        "message" => self.message = Some(text),
                        "change" => self.change = Some(text),
                        _ => {}
                    }
                }
            }
            let mut fields = Fields::default();
            event.record(&mut fields);
            let mut state = self.state.lock().expect("field trace lock");
            match fields.message.as_deref() {
                Some("single_char.change") => {
                    state.changes.push(fields.change.unwrap_or_default());
                }
                Some("single_char.observer_busy") => state.saw_busy_warning = true,
                _ => {}
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_change_and_busy_events_emitted() {
        let state = Arc::new(Mutex::new(FieldTraceState::default()));
        let subscriber = tracing_subscriber::registry().with(FieldTraceCapture {
            state: Arc::clone(&state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let (mut field, log) = observed();
        field.assign("ab");
        field.handle_backspace();
        field.handle_backspace();
        {
            let _held = log.borrow_mut();
            field.assign("c");
        }

        let snapshot = state.lock().expect("field trace lock");
        assert_eq!(
            snapshot.changes,
            vec![
                "character_added_with_overflow",
                "became_empty",
                "underflowed",
                "character_added",
            ]
        );
        assert!(snapshot.saw_busy_warning, "expected observer_busy warning");
    }
}
