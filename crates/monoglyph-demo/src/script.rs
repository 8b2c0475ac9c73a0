//! Edit scripts for the `replay` command.
//!
//! One step per line. Blank lines and lines starting with `#` are skipped.
//! The argument is everything after the first space, taken verbatim.
//!
//! ```text
//! type ab        # one key press per char
//! paste hello    # bracketed paste
//! set xyz        # programmatic assignment; `set` alone assigns ""
//! edit q         # input surface now holds exactly "q"
//! backspace 2    # count defaults to 1
//! ```

use monoglyph_core::event::{Event, KeyCode, KeyEvent, PasteEvent};

use crate::error::{DemoError, Result};
use crate::host::HostScreen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Type(String),
    Paste(String),
    Set(String),
    Edit(String),
    Backspace(usize),
}

impl ScriptStep {
    /// Apply this step to the host's field. Returns how many field
    /// operations were performed.
    pub fn apply<W: std::io::Write + 'static>(&self, host: &mut HostScreen<W>) -> usize {
        match self {
            Self::Type(text) => text
                .chars()
                .filter(|&c| host.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c)))))
                .count(),
            Self::Paste(text) => {
                usize::from(host.handle_event(&Event::Paste(PasteEvent::new(text.as_str()))))
            }
            Self::Set(text) => {
                host.assign(text);
                1
            }
            Self::Edit(text) => {
                host.on_user_edit(text);
                1
            }
            Self::Backspace(count) => {
                for _ in 0..*count {
                    host.handle_backspace();
                }
                *count
            }
        }
    }
}

/// Parse a whole script. Errors carry the 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let step = parse_line(line).map_err(|message| DemoError::script(index + 1, message))?;
        steps.extend(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> std::result::Result<Option<ScriptStep>, String> {
    let line = line.trim_start();
    if line.trim_end().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, argument) = match line.split_once(' ') {
        Some((verb, argument)) => (verb, Some(argument)),
        None => (line.trim_end(), None),
    };
    let step = match verb {
        "type" => ScriptStep::Type(required(verb, argument)?),
        "paste" => ScriptStep::Paste(required(verb, argument)?),
        "set" => ScriptStep::Set(argument.unwrap_or_default().to_owned()),
        "edit" => ScriptStep::Edit(argument.unwrap_or_default().to_owned()),
        "backspace" => ScriptStep::Backspace(backspace_count(argument)?),
        other => return Err(format!("unknown verb `{other}`")),
    };
    Ok(Some(step))
}

fn required(verb: &str, argument: Option<&str>) -> std::result::Result<String, String> {
    match argument {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(format!("`{verb}` needs text")),
    }
}

fn backspace_count(argument: Option<&str>) -> std::result::Result<usize, String> {
    let Some(raw) = argument.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(1);
    };
    match raw.parse::<usize>() {
        Ok(0) => Err("backspace count must be at least 1".to_owned()),
        Ok(count) => Ok(count),
        Err(_) => Err(format!("bad backspace count `{raw}`")),
    }
}
