#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Widgets consume these instead of backend-specific events so that the
//! same editing logic runs under a real terminal, a script replay, or a test.

use bitflags::bitflags;

/// An input event delivered to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// Text delivered in one piece (bracketed paste, autocomplete).
    Paste(PasteEvent),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
    /// Terminal resized to (columns, rows).
    Resize { width: u16, height: u16 },
    /// Periodic tick.
    Tick,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat (i.e. not a release).
    #[must_use]
    pub const fn is_press_like(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether a command modifier (Ctrl, Alt, Super) is held.
    ///
    /// Shift is not a command modifier: it only selects the typed character.
    #[must_use]
    pub fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
    }
}

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Left,
    Right,
    Home,
    End,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Press, repeat, or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Text pasted into the input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
    use crossterm::event as ct;

    impl Event {
        /// Convert a Crossterm event.
        ///
        /// Returns `None` for events with no monoglyph counterpart (mouse,
        /// unmapped keys).
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => KeyEvent::from_crossterm(key).map(Event::Key),
                ct::Event::Paste(text) => Some(Event::Paste(PasteEvent { text })),
                ct::Event::FocusGained => Some(Event::Focus(true)),
                ct::Event::FocusLost => Some(Event::Focus(false)),
                ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
                _ => None,
            }
        }
    }

    impl KeyEvent {
        fn from_crossterm(key: ct::KeyEvent) -> Option<Self> {
            let code = match key.code {
                ct::KeyCode::Char(c) => KeyCode::Char(c),
                ct::KeyCode::Backspace => KeyCode::Backspace,
                ct::KeyCode::Delete => KeyCode::Delete,
                ct::KeyCode::Enter => KeyCode::Enter,
                ct::KeyCode::Tab => KeyCode::Tab,
                ct::KeyCode::Esc => KeyCode::Escape,
                ct::KeyCode::Left => KeyCode::Left,
                ct::KeyCode::Right => KeyCode::Right,
                ct::KeyCode::Home => KeyCode::Home,
                ct::KeyCode::End => KeyCode::End,
                _ => return None,
            };
            let kind = match key.kind {
                ct::KeyEventKind::Press => KeyEventKind::Press,
                ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                ct::KeyEventKind::Release => KeyEventKind::Release,
            };
            Some(Self {
                code,
                modifiers: modifiers_from_crossterm(key.modifiers),
                kind,
            })
        }
    }

    fn modifiers_from_crossterm(mods: ct::KeyModifiers) -> Modifiers {
        let mut out = Modifiers::NONE;
        if mods.contains(ct::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if mods.contains(ct::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if mods.contains(ct::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        if mods.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META) {
            out |= Modifiers::SUPER;
        }
        out
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_key_is_unmodified_press() {
        let key = KeyEvent::new(KeyCode::Backspace);
        assert_eq!(key.kind, KeyEventKind::Press);
        assert!(key.modifiers.is_empty());
        assert!(key.is_press_like());
    }

    #[test]
    fn release_is_not_press_like() {
        let key = KeyEvent::new(KeyCode::Char('a')).with_kind(KeyEventKind::Release);
        assert!(!key.is_press_like());
        let key = key.with_kind(KeyEventKind::Repeat);
        assert!(key.is_press_like());
    }

    #[test]
    fn shift_is_not_a_command_modifier() {
        let shifted = KeyEvent::new(KeyCode::Char('A')).with_modifiers(Modifiers::SHIFT);
        assert!(!shifted.has_command_modifier());
        let ctrl = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        assert!(ctrl.has_command_modifier());
        let alt_shift = KeyEvent::new(KeyCode::Char('a'))
            .with_modifiers(Modifiers::ALT | Modifiers::SHIFT);
        assert!(alt_shift.has_command_modifier());
    }
}
