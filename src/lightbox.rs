//! The lightbox controller.
//!
//! [`Lightbox`] presents one [`GalleryItem`] at a time in a modal overlay on a
//! [`Document`]. At most one [`LightboxSession`] exists at a time; it is
//! created by [`Lightbox::open`] and destroyed by [`Lightbox::close`].
//!
//! ## Session resources
//!
//! Opening a session acquires three things from the document, and closing
//! releases all three before returning:
//!
//! | Acquired on open | Released on close |
//! |------------------|-------------------|
//! | overlay mounted in the overlay slot | overlay unmounted |
//! | body scroll locked | body scroll unlocked |
//! | keyboard [`Subscription`] (stored in the session) | unsubscribed |
//!
//! Because the subscription lives inside the session, a closed lightbox holds
//! no listener and key presses after close reach nothing.
//!
//! The session belongs to the document it was opened on: its listener is
//! attached to that document's keyboard stream and to no other. Navigating or
//! closing against any other document is rejected with
//! [`LightboxError::ForeignDocument`] and leaves both documents untouched.
//!
//! ## Input
//!
//! [`Lightbox::dispatch`] maps raw page input to operations:
//!
//! | Input | Open session | No session |
//! |-------|--------------|------------|
//! | `Activate(i)` | rejected (already open) | `open(i)` |
//! | click Next / Previous | `next()` / `previous()` | ignored |
//! | click Close | `close()` | ignored |
//! | click Backdrop | `close()` (if `close_on_backdrop`) | ignored |
//! | click Panel | ignored | ignored |
//! | key bound to an action | that action | ignored (no listener) |
//!
//! Only a click whose target is exactly the backdrop root dismisses. Clicks
//! inside the panel never do.

use crate::config::{ConfigError, LightboxConfig};
use crate::document::Document;
use crate::keyboard::{Key, KeyAction, KeyBindings, Subscription};
use crate::render;
use crate::types::{GalleryCollection, GalleryItem};
use serde::Serialize;
use thiserror::Error;

/// Index after `index` in a `len`-item gallery, wrapping to the first.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Index before `index` in a `len`-item gallery, wrapping to the last.
pub fn previous_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Precondition violations. None of these are shown to the visitor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightboxError {
    #[error("cannot open a lightbox on an empty gallery")]
    EmptyCollection,
    #[error("index {index} is out of range for a gallery of {len} images")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no lightbox session is open")]
    NoSession,
    #[error("a lightbox session is already open at index {0}")]
    AlreadyOpen(usize),
    #[error("the lightbox session is open on a different document")]
    ForeignDocument,
}

/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    /// The dimmed backdrop root itself.
    Backdrop,
    /// Anywhere inside the content panel that is not a control.
    Panel,
    Close,
    Previous,
    Next,
}

/// One discrete input event from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// The visitor clicked the gallery item at `index`.
    Activate { index: usize },
    Click { target: ClickTarget },
    KeyDown { key: Key },
}

/// What an input event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Opened { index: usize },
    Moved { from: usize, to: usize },
    Closed { index: usize },
    /// The event has no effect in the current state.
    Ignored,
    /// The event violated a precondition; state is unchanged.
    Rejected { reason: String },
}

/// State that exists only while the overlay is open.
#[derive(Debug)]
pub struct LightboxSession {
    current_index: usize,
    keys: Subscription,
}

impl LightboxSession {
    pub fn current_index(&self) -> usize {
        self.current_index
    }
}

/// Lightbox controller over a fixed collection.
#[derive(Debug)]
pub struct Lightbox {
    items: GalleryCollection,
    bindings: KeyBindings,
    close_on_backdrop: bool,
    session: Option<LightboxSession>,
}

impl Lightbox {
    /// Controller with the default key bindings and backdrop dismissal on.
    pub fn new(items: GalleryCollection) -> Self {
        Self {
            items,
            bindings: KeyBindings::default(),
            close_on_backdrop: true,
            session: None,
        }
    }

    /// Controller configured from a validated [`LightboxConfig`].
    pub fn with_config(
        items: GalleryCollection,
        config: &LightboxConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            items,
            bindings: config.key_bindings()?,
            close_on_backdrop: config.close_on_backdrop,
            session: None,
        })
    }

    pub fn items(&self) -> &GalleryCollection {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&LightboxSession> {
        self.session.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current_index)
    }

    pub fn current_item(&self) -> Option<&GalleryItem> {
        self.current_index().and_then(|i| self.items.get(i))
    }

    /// Open the overlay on the item at `start`.
    ///
    /// On error nothing is acquired: no overlay, no scroll lock, no listener.
    pub fn open(&mut self, doc: &mut Document, start: usize) -> Result<(), LightboxError> {
        if let Some(session) = &self.session {
            return Err(LightboxError::AlreadyOpen(session.current_index));
        }
        let len = self.items.len();
        if len == 0 {
            return Err(LightboxError::EmptyCollection);
        }
        if start >= len {
            return Err(LightboxError::IndexOutOfRange { index: start, len });
        }

        let keys = doc.keyboard_mut().subscribe();
        doc.lock_scroll();
        self.session = Some(LightboxSession {
            current_index: start,
            keys,
        });
        self.render(doc, start);
        Ok(())
    }

    /// Advance one item, wrapping from the last to the first.
    pub fn next(&mut self, doc: &mut Document) -> Result<usize, LightboxError> {
        self.step(doc, next_index)
    }

    /// Go back one item, wrapping from the first to the last.
    pub fn previous(&mut self, doc: &mut Document) -> Result<usize, LightboxError> {
        self.step(doc, previous_index)
    }

    /// End the session and release everything it acquired.
    ///
    /// Returns the index that was showing, or `None` if nothing was open.
    /// Calling it again is a no-op.
    pub fn close(&mut self, doc: &mut Document) -> Result<Option<usize>, LightboxError> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        if !doc.keyboard().is_subscribed(session.keys.id()) {
            self.session = Some(session);
            return Err(LightboxError::ForeignDocument);
        }
        doc.keyboard_mut().unsubscribe(session.keys);
        doc.unmount_overlay();
        doc.unlock_scroll();
        Ok(Some(session.current_index))
    }

    /// Route one input event to the matching operation.
    pub fn dispatch(&mut self, doc: &mut Document, event: InputEvent) -> Transition {
        match event {
            InputEvent::Activate { index } => match self.open(doc, index) {
                Ok(()) => Transition::Opened { index },
                Err(err) => Transition::Rejected {
                    reason: err.to_string(),
                },
            },
            // Controls only exist while the overlay is mounted.
            InputEvent::Click { .. } if !self.is_open() => Transition::Ignored,
            InputEvent::Click { target } => match target {
                ClickTarget::Next => self.moved(doc, KeyAction::Next),
                ClickTarget::Previous => self.moved(doc, KeyAction::Previous),
                ClickTarget::Close => self.closed(doc),
                ClickTarget::Backdrop if self.close_on_backdrop => self.closed(doc),
                ClickTarget::Backdrop | ClickTarget::Panel => Transition::Ignored,
            },
            InputEvent::KeyDown { key } => self.key_down(doc, key),
        }
    }

    fn key_down(&mut self, doc: &mut Document, key: Key) -> Transition {
        let Some(listener) = self.session.as_ref().map(|s| s.keys.id()) else {
            return Transition::Ignored;
        };
        // A press on some other page never reaches this session's listener.
        let reached = doc
            .keyboard()
            .deliveries(key)
            .iter()
            .any(|d| d.listener == listener);
        if !reached {
            return Transition::Ignored;
        }
        match self.bindings.action_for(key) {
            Some(KeyAction::Close) => self.closed(doc),
            Some(action) => self.moved(doc, action),
            None => Transition::Ignored,
        }
    }

    fn moved(&mut self, doc: &mut Document, action: KeyAction) -> Transition {
        let Some(from) = self.current_index() else {
            return Transition::Ignored;
        };
        let result = match action {
            KeyAction::Next => self.next(doc),
            KeyAction::Previous => self.previous(doc),
            KeyAction::Close => return self.closed(doc),
        };
        match result {
            Ok(to) => Transition::Moved { from, to },
            Err(err) => Transition::Rejected {
                reason: err.to_string(),
            },
        }
    }

    fn closed(&mut self, doc: &mut Document) -> Transition {
        match self.close(doc) {
            Ok(Some(index)) => Transition::Closed { index },
            Ok(None) => Transition::Ignored,
            Err(err) => Transition::Rejected {
                reason: err.to_string(),
            },
        }
    }

    fn step(
        &mut self,
        doc: &mut Document,
        advance: impl Fn(usize, usize) -> usize,
    ) -> Result<usize, LightboxError> {
        let len = self.items.len();
        let session = self.session.as_mut().ok_or(LightboxError::NoSession)?;
        if !doc.keyboard().is_subscribed(session.keys.id()) {
            return Err(LightboxError::ForeignDocument);
        }
        session.current_index = advance(session.current_index, len);
        let index = session.current_index;
        self.render(doc, index);
        Ok(index)
    }

    fn render(&self, doc: &mut Document, index: usize) {
        if let Some(item) = self.items.get(index) {
            let html = render::overlay(item, index, self.items.len());
            doc.mount_overlay(html.into_string());
        }
    }
}
