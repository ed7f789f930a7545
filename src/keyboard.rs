//! The global keyboard-event stream and key bindings.
//!
//! Listeners attach with [`KeyboardStream::subscribe`] and get back a
//! [`Subscription`] handle. The handle is the only way to detach, and
//! [`KeyboardStream::unsubscribe`] consumes it, so a detached listener cannot
//! be detached twice or keep receiving keys.
//!
//! Keys are delivered to listeners in subscription order. The stream itself
//! does not know what a listener does with a key; it only reports which
//! listeners a key press reaches (see [`KeyboardStream::deliveries`]).

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A key press, named the way `KeyboardEvent.key` names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Tab,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any single printable character, e.g. `j`.
    Char(char),
}

impl Key {
    /// Parse a DOM key name. Returns `None` for names this crate does not model.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => f.write_str("Escape"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::Enter => f.write_str("Enter"),
            Key::Space => f.write_str("Space"),
            Key::Tab => f.write_str("Tab"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a bound key does while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Previous,
    Close,
}

impl KeyAction {
    /// Name of the `[keys]` entry for this action.
    pub fn config_name(self) -> &'static str {
        match self {
            KeyAction::Next => "next",
            KeyAction::Previous => "previous",
            KeyAction::Close => "close",
        }
    }
}

/// Key → action lookup built from [`crate::config::KeysConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<Key, KeyAction>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Bind `key`, replacing any previous binding for it.
    pub fn bind(&mut self, key: Key, action: KeyAction) {
        self.map.insert(key, action);
    }

    pub fn action_for(&self, key: Key) -> Option<KeyAction> {
        self.map.get(&key).copied()
    }
}

impl Default for KeyBindings {
    /// ArrowRight / ArrowLeft navigate, Escape closes.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(Key::ArrowRight, KeyAction::Next);
        bindings.bind(Key::ArrowLeft, KeyAction::Previous);
        bindings.bind(Key::Escape, KeyAction::Close);
        bindings
    }
}

/// Source of listener ids, shared by every stream in the process.
static NEXT_LISTENER: AtomicU64 = AtomicU64::new(0);

/// Identifies one attached listener. Unique across all streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Proof of an attached keyboard listener.
///
/// Not `Clone`: exactly one owner holds it, and giving it back to
/// [`KeyboardStream::unsubscribe`] is the only way to detach.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a Subscription leaves the listener attached"]
pub struct Subscription {
    id: ListenerId,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

/// A key press routed to one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub listener: ListenerId,
    pub key: Key,
}

/// The document-wide keydown stream.
#[derive(Debug, Default)]
pub struct KeyboardStream {
    listeners: BTreeSet<ListenerId>,
}

impl KeyboardStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new listener.
    pub fn subscribe(&mut self) -> Subscription {
        let id = ListenerId(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed));
        self.listeners.insert(id);
        Subscription { id }
    }

    /// Detach the listener behind `subscription`.
    ///
    /// Returns `false` if it was not attached to this stream, in which case
    /// this stream is left untouched.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(&subscription.id)
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Every listener a press of `key` reaches, in subscription order.
    pub fn deliveries(&self, key: Key) -> Vec<Delivery> {
        self.listeners
            .iter()
            .map(|&listener| Delivery { listener, key })
            .collect()
    }
}
