use std::io::{self, IsTerminal, Stdout, Write};

use clap::Args;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::{execute, terminal};
use monoglyph_core::event::{Event, KeyCode, KeyEvent, Modifiers};

use crate::error::{DemoError, Result};
use crate::host::{ConsoleLogObserver, HostScreen};

#[derive(Debug, Clone, Default, Args)]
pub struct InteractiveArgs {
    /// Assign this text to the field before reading input.
    #[arg(long)]
    pub initial: Option<String>,
}

/// Raw mode plus bracketed paste for the guard's lifetime.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(stdout, EnableBracketedPaste)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableBracketedPaste);
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::warn!(message = "terminal.restore_failed", %error);
        }
    }
}

/// Esc, Ctrl-C and Ctrl-D end the session.
fn is_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if !key.is_press_like() {
        return false;
    }
    match key.code {
        KeyCode::Escape => true,
        KeyCode::Char('c' | 'd') => key.modifiers.contains(Modifiers::CTRL),
        _ => false,
    }
}

fn describe(key: &KeyEvent) -> String {
    format!("{:?} {:?}", key.code, key.modifiers)
}

pub fn run_interactive(args: InteractiveArgs) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(DemoError::invalid(
            "interactive mode needs a terminal on stdin; use `replay` for scripts",
        ));
    }
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let mut host = HostScreen::new(ConsoleLogObserver::new(stdout).with_crlf());
    host.line(format_args!(
        "Single-character field. Type, paste or press Backspace; Esc quits."
    ));
    host.line(format_args!(""));
    if let Some(initial) = &args.initial {
        host.assign(initial);
    }
    host.check_output()?;

    loop {
        let raw = crossterm::event::read()?;
        let Some(event) = Event::from_crossterm(raw) else {
            continue;
        };
        if is_quit(&event) {
            break;
        }
        if !host.handle_event(&event)
            && let Event::Key(key) = &event
            && key.is_press_like()
        {
            tracing::debug!(message = "host.key_ignored", key = %describe(key));
        }
        host.check_output()?;
    }

    tracing::info!(
        message = "interactive.finished",
        notifications = host.notifications()
    );
    host.finish()?;
    Ok(())
}
