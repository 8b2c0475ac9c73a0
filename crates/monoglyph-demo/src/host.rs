//! The host screen: one field, one console-logging observer.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use monoglyph_core::event::Event;
use monoglyph_widgets::{FieldChange, SingleCharField, SingleCharObserver};

use crate::error::{DemoError, Result};

/// Printed after every notification.
pub const SEPARATOR: &str = "*********************";

/// Observer that writes each notification and the field's current
/// character to a console-like sink.
///
/// Observer methods cannot fail, so the first write error is latched and
/// later writes are skipped; collect it with [`take_error`](Self::take_error).
#[derive(Debug)]
pub struct ConsoleLogObserver<W: Write> {
    out: W,
    line_ending: &'static str,
    notifications: usize,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleLogObserver<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_ending: "\n",
            notifications: 0,
            error: None,
        }
    }

    /// Terminate lines with `\r\n` (needed while the terminal is in raw mode).
    #[must_use]
    pub fn with_crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    /// Notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> usize {
        self.notifications
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a free-form line (banners, prompts) in the same line style.
    pub fn line(&mut self, text: fmt::Arguments<'_>) {
        self.write_line(text);
    }

    fn report(
        &mut self,
        field: &SingleCharField,
        event: &'static str,
        headline: fmt::Arguments<'_>,
    ) {
        self.notifications += 1;
        tracing::info!(
            message = "host.notification",
            event,
            displayed = %field.displayed_character()
        );
        self.write_line(format_args!("{event}: {headline}"));
        self.write_line(format_args!(
            "Value of field.character = {}",
            field.displayed_character()
        ));
        self.write_line(format_args!("{SEPARATOR}"));
        self.write_line(format_args!(""));
    }

    fn write_line(&mut self, text: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        let eol = self.line_ending;
        if let Err(error) = write!(self.out, "{text}{eol}") {
            tracing::warn!(message = "host.write_failed", %error);
            self.error = Some(error);
        }
    }
}

impl<W: Write> SingleCharObserver for ConsoleLogObserver<W> {
    fn character_added(&mut self, field: &SingleCharField, character: &str) {
        self.report(
            field,
            "character_added",
            format_args!("Added character {character}"),
        );
    }

    fn character_added_with_overflow(
        &mut self,
        field: &SingleCharField,
        character: &str,
        overflow: &str,
    ) {
        self.report(
            field,
            "character_added_with_overflow",
            format_args!("Added character = {character} with overflow = {overflow}"),
        );
    }

    fn became_empty(&mut self, field: &SingleCharField, old_value: &str) {
        self.report(
            field,
            "became_empty",
            format_args!("Became empty from {old_value}"),
        );
    }

    fn underflowed(&mut self, field: &SingleCharField) {
        self.report(field, "underflowed", format_args!("Backspace on empty field"));
    }
}

/// A field wired to a [`ConsoleLogObserver`].
pub struct HostScreen<W: Write + 'static> {
    field: SingleCharField,
    console: Rc<RefCell<ConsoleLogObserver<W>>>,
}

impl<W: Write + 'static> HostScreen<W> {
    #[must_use]
    pub fn new(console: ConsoleLogObserver<W>) -> Self {
        let console = Rc::new(RefCell::new(console));
        let mut field = SingleCharField::new();
        field.set_observer(&console);
        Self { field, console }
    }

    #[must_use]
    pub fn field(&self) -> &SingleCharField {
        &self.field
    }

    pub fn assign(&mut self, value: &str) -> FieldChange {
        self.field.assign(value)
    }

    pub fn on_user_edit(&mut self, raw_text: &str) -> FieldChange {
        self.field.on_user_edit(raw_text)
    }

    pub fn handle_backspace(&mut self) -> FieldChange {
        self.field.handle_backspace()
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.field.handle_event(event)
    }

    pub fn line(&mut self, text: fmt::Arguments<'_>) {
        self.console.borrow_mut().line(text);
    }

    #[must_use]
    pub fn notifications(&self) -> usize {
        self.console.borrow().notifications()
    }

    /// Surface a latched write error, if any.
    pub fn check_output(&mut self) -> Result<()> {
        match self.console.borrow_mut().take_error() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    /// Flush the console and hand back its writer.
    pub fn finish(self) -> Result<W> {
        let Self { field, console } = self;
        drop(field);
        let mut console = Rc::into_inner(console)
            .ok_or(DemoError::ObserverShared)?
            .into_inner();
        if let Some(error) = console.take_error() {
            return Err(error.into());
        }
        let mut out = console.into_inner();
        out.flush()?;
        Ok(out)
    }
}
