//! Scripted input replay.
//!
//! Runs a sequence of visitor inputs against a [`Lightbox`] on a fresh
//! [`Document`] and records what each input did. Used by the `replay` CLI
//! command to check a gallery's behavior without a browser.
//!
//! ## Script format
//!
//! One event per line; blank lines are skipped. A word starting with `#`
//! begins a comment wherever a command or the end of the line is expected.
//! In argument position it is the argument, so `key #` presses the `#` key.
//!
//! ```text
//! open 3            # click the gallery item at index 3
//! next              # click the next control
//! prev              # click the previous control (also: previous)
//! close             # click the close control
//! click backdrop    # click target: backdrop | panel | close | prev | next
//! key ArrowRight    # key press, KeyboardEvent.key spelling
//! ```

use crate::config::ConfigError;
use crate::document::Document;
use crate::keyboard::Key;
use crate::lightbox::{ClickTarget, InputEvent, Lightbox, Transition};
use crate::types::Manifest;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// One parsed script event with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEvent {
    pub line: usize,
    pub event: InputEvent,
}

/// The outcome of one event, plus the page state right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub line: usize,
    pub event: InputEvent,
    pub transition: Transition,
    pub current: Option<usize>,
    pub overlay: bool,
    pub scroll_locked: bool,
    pub listeners: usize,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let words = script_words(raw);
        let Some((&command, rest)) = words.split_first() else {
            continue;
        };
        let event = parse_event(command, rest)
            .map_err(|message| ReplayError::Parse { line, message })?;
        events.push(ScriptEvent { line, event });
    }
    Ok(events)
}

/// The words of a script line, up to its comment.
fn script_words(raw: &str) -> Vec<&str> {
    let mut words: Vec<&str> = Vec::new();
    for word in raw.split_whitespace() {
        let is_argument = words.len() == 1 && takes_argument(words[0]);
        if word.starts_with('#') && !is_argument {
            break;
        }
        words.push(word);
    }
    words
}

fn takes_argument(command: &str) -> bool {
    matches!(command, "open" | "click" | "key")
}

fn parse_event(command: &str, rest: &[&str]) -> Result<InputEvent, String> {
    let argument = rest.first().copied();
    if let Some(extra) = rest.get(1) {
        return Err(format!("unexpected '{extra}' after '{command}'"));
    }

    let click = |target| InputEvent::Click { target };
    match (command, argument) {
        ("open", Some(index)) => index
            .parse()
            .map(|index| InputEvent::Activate { index })
            .map_err(|_| format!("'{index}' is not an image index")),
        ("open", None) => Err("open needs an image index".to_string()),
        ("next", None) => Ok(click(ClickTarget::Next)),
        ("prev" | "previous", None) => Ok(click(ClickTarget::Previous)),
        ("close", None) => Ok(click(ClickTarget::Close)),
        ("click", Some(target)) => parse_target(target).map(click),
        ("click", None) => Err("click needs a target".to_string()),
        ("key", Some(name)) => Key::from_name(name)
            .map(|key| InputEvent::KeyDown { key })
            .ok_or_else(|| format!("unknown key '{name}'")),
        ("key", None) => Err("key needs a key name".to_string()),
        (command, Some(arg)) if matches!(command, "next" | "prev" | "previous" | "close") => {
            Err(format!("unexpected '{arg}' after '{command}'"))
        }
        (command, _) => Err(format!("unknown command '{command}'")),
    }
}

fn parse_target(name: &str) -> Result<ClickTarget, String> {
    match name {
        "backdrop" => Ok(ClickTarget::Backdrop),
        "panel" => Ok(ClickTarget::Panel),
        "close" => Ok(ClickTarget::Close),
        "prev" | "previous" => Ok(ClickTarget::Previous),
        "next" => Ok(ClickTarget::Next),
        other => Err(format!("unknown click target '{other}'")),
    }
}

/// Replay `events` against the manifest's gallery and config.
pub fn run(manifest: &Manifest, events: &[ScriptEvent]) -> Result<Vec<Step>, ReplayError> {
    let mut lightbox = Lightbox::with_config(manifest.items.clone(), &manifest.config)?;
    let mut doc = Document::new();

    let steps = events
        .iter()
        .map(|&ScriptEvent { line, event }| {
            let transition = lightbox.dispatch(&mut doc, event);
            Step {
                line,
                event,
                transition,
                current: lightbox.current_index(),
                overlay: doc.has_overlay(),
                scroll_locked: doc.is_scroll_locked(),
                listeners: doc.keyboard().listener_count(),
            }
        })
        .collect();
    Ok(steps)
}
