#![forbid(unsafe_code)]

//! Notification contract for [`SingleCharField`].

use super::SingleCharField;

/// Receives the outcome of every content change of a [`SingleCharField`].
///
/// Exactly one method is called per mutating call on the field. Each call
/// happens after the field's displayed content has been updated, so
/// `field.displayed_character()` already reflects the change.
pub trait SingleCharObserver {
    /// A single unit was assigned.
    fn character_added(&mut self, field: &SingleCharField, character: &str);

    /// More than one unit was assigned. `character` was kept; `overflow`
    /// holds the remaining units and is not stored anywhere.
    ///
    /// This happens on paste, on typing into an occupied field, or on a
    /// programmatic assignment of a longer string.
    fn character_added_with_overflow(
        &mut self,
        field: &SingleCharField,
        character: &str,
        overflow: &str,
    );

    /// The field was emptied. `old_value` is the unit shown before, or `""`
    /// if the field was already empty.
    fn became_empty(&mut self, field: &SingleCharField, old_value: &str);

    /// Backspace was pressed while the field was already empty.
    fn underflowed(&mut self, field: &SingleCharField);
}

/// The outcome of one mutating call, as delivered to the observer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldChange {
    CharacterAdded {
        character: String,
    },
    CharacterAddedWithOverflow {
        character: String,
        overflow: String,
    },
    BecameEmpty {
        old_value: String,
    },
    Underflowed,
}

impl FieldChange {
    /// Stable name of the notification, matching the observer method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CharacterAdded { .. } => "character_added",
            Self::CharacterAddedWithOverflow { .. } => "character_added_with_overflow",
            Self::BecameEmpty { .. } => "became_empty",
            Self::Underflowed => "underflowed",
        }
    }

    /// Call the observer method this change corresponds to.
    pub fn deliver(&self, observer: &mut dyn SingleCharObserver, field: &SingleCharField) {
        match self {
            Self::CharacterAdded { character } => observer.character_added(field, character),
            Self::CharacterAddedWithOverflow {
                character,
                overflow,
            } => observer.character_added_with_overflow(field, character, overflow),
            Self::BecameEmpty { old_value } => observer.became_empty(field, old_value),
            Self::Underflowed => observer.underflowed(field),
        }
    }
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    pub change: FieldChange,
    /// `displayed_character()` at the time of the notification.
    pub displayed: String,
}

/// Observer that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    /// Recorded changes without the display snapshots.
    pub fn changes(&self) -> impl Iterator<Item = &FieldChange> {
        self.entries.iter().map(|entry| &entry.change)
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChangeLogEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn record(&mut self, field: &SingleCharField, change: FieldChange) {
        self.entries.push(ChangeLogEntry {
            change,
            displayed: field.displayed_character().to_owned(),
        });
    }
}

impl SingleCharObserver for ChangeLog {
    fn character_added(&mut self, field: &SingleCharField, character: &str) {
        self.record(
            field,
            FieldChange::CharacterAdded {
                character: character.to_owned(),
            },
        );
    }

    fn character_added_with_overflow(
        &mut self,
        field: &SingleCharField,
        character: &str,
        overflow: &str,
    ) {
        self.record(
            field,
            FieldChange::CharacterAddedWithOverflow {
                character: character.to_owned(),
                overflow: overflow.to_owned(),
            },
        );
    }

    fn became_empty(&mut self, field: &SingleCharField, old_value: &str) {
        self.record(
            field,
            FieldChange::BecameEmpty {
                old_value: old_value.to_owned(),
            },
        );
    }

    fn underflowed(&mut self, field: &SingleCharField) {
        self.record(field, FieldChange::Underflowed);
    }
}
