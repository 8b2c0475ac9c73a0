#![no_main]

use std::cell::RefCell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use monoglyph_core::event::{Event, KeyCode, KeyEvent, PasteEvent};
use monoglyph_core::grapheme::unit_count;
use monoglyph_widgets::{ChangeLog, FieldChange, SingleCharField};

#[derive(Arbitrary, Debug)]
enum FuzzEdit {
    Assign(String),
    UserEdit(String),
    Backspace,
    Type(char),
    Paste(String),
}

fuzz_target!(|edits: Vec<FuzzEdit>| {
    let log = Rc::new(RefCell::new(ChangeLog::new()));
    let mut field = SingleCharField::new();
    field.set_observer(&log);

    for edit in edits.iter().take(256) {
        let before = log.borrow().len();
        match edit {
            FuzzEdit::Assign(text) => {
                if let FieldChange::CharacterAddedWithOverflow { character, overflow } =
                    field.assign(text)
                {
                    assert_eq!(format!("{character}{overflow}"), *text);
                }
            }
            FuzzEdit::UserEdit(text) => {
                field.on_user_edit(text);
            }
            FuzzEdit::Backspace => {
                field.handle_backspace();
            }
            FuzzEdit::Type(c) => {
                field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(*c))));
            }
            FuzzEdit::Paste(text) => {
                field.handle_event(&Event::Paste(PasteEvent::new(text.as_str())));
            }
        }
        assert!(unit_count(field.displayed_character()) <= 1);
        assert!(log.borrow().len() - before <= 1);
    }
});
