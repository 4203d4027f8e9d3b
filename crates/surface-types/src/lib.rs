//! # Surface Types
//!
//! ## Overview
//!
//! The types in this crate describe an editable surface from the outside: where its
//! [selection](selection::Selection) is, which native [signals](Signal) a host can report about
//! it, and the two kinds of normalized notifications that observers receive when its content or
//! selection really changes.
//!
//! ## Example
//!
//! ```
//! use surface_types::{KindFlags, NotificationKind, Signal};
//!
//! // A mouse click can only move the caret.
//! assert_eq!(Signal::MouseUp.kinds(), KindFlags::SELECTION);
//!
//! // Typing can change both the content and the caret.
//! assert!(Signal::Input.kinds().contains(NotificationKind::FieldChange.into()));
//! assert!(Signal::Input.kinds().contains(NotificationKind::SelectionChange.into()));
//!
//! assert_eq!(NotificationKind::FieldChange.to_string(), "field:change");
//! ```
pub mod selection;

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use self::selection::Selection;

/// The two kinds of notifications an observer can subscribe to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The surface's content was modified.
    FieldChange,

    /// The surface's caret or selected range moved.
    SelectionChange,
}

impl NotificationKind {
    /// The event name used when reporting this kind of notification.
    pub fn name(&self) -> &'static str {
        match self {
            NotificationKind::FieldChange => "field:change",
            NotificationKind::SelectionChange => "selection:change",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of [notification kinds](NotificationKind).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
    pub struct KindFlags: u8 {
        /// Content changes.
        const FIELD = 0b01;

        /// Selection changes.
        const SELECTION = 0b10;

        /// Every kind.
        const ALL = Self::FIELD.bits() | Self::SELECTION.bits();
    }
}

impl Default for KindFlags {
    fn default() -> Self {
        KindFlags::ALL
    }
}

impl From<NotificationKind> for KindFlags {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::FieldChange => KindFlags::FIELD,
            NotificationKind::SelectionChange => KindFlags::SELECTION,
        }
    }
}

/// A native signal reported by the host for an editable surface.
///
/// Hosts fire these with arbitrary frequency; several of them usually accompany a single logical
/// edit, and some edits (like a programmatic change) may not be accompanied by any of them, in
/// which case the host can use [Signal::Poll].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Signal {
    /// Text was entered or removed.
    Input,

    /// A key was pressed. This arrives before the host applies the key's effect.
    KeyDown,

    /// A key was released.
    KeyUp,

    /// A pointer button was pressed.
    MouseDown,

    /// A pointer button was released.
    MouseUp,

    /// Content was pasted.
    Paste,

    /// Content was cut.
    Cut,

    /// Content was dropped onto the surface.
    Drop,

    /// The surface gained focus.
    Focus,

    /// The surface lost focus.
    Blur,

    /// The host reports that the selection moved.
    SelectionChange,

    /// An input method finished composing text.
    CompositionEnd,

    /// No particular event; check everything.
    Poll,
}

impl Signal {
    /// Which kinds of notifications this signal can lead to.
    pub fn kinds(&self) -> KindFlags {
        match self {
            Signal::KeyDown => KindFlags::empty(),

            Signal::MouseDown => KindFlags::SELECTION,
            Signal::MouseUp => KindFlags::SELECTION,
            Signal::Focus => KindFlags::SELECTION,
            Signal::Blur => KindFlags::SELECTION,
            Signal::SelectionChange => KindFlags::SELECTION,

            Signal::Input => KindFlags::ALL,
            Signal::KeyUp => KindFlags::ALL,
            Signal::Paste => KindFlags::ALL,
            Signal::Cut => KindFlags::ALL,
            Signal::Drop => KindFlags::ALL,
            Signal::CompositionEnd => KindFlags::ALL,
            Signal::Poll => KindFlags::ALL,
        }
    }
}

/// Delivered to field change listeners.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldChange {
    /// The content as it was last observed.
    pub previous: String,

    /// The content now.
    pub content: String,
}

/// Delivered to selection change listeners.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionChange {
    /// The selection as it was last observed.
    pub previous: Option<Selection>,

    /// The selection now, or `None` if the surface has no selection.
    pub selection: Option<Selection>,
}

impl SelectionChange {
    /// Returns true if the surface gained a selection it did not previously have.
    pub fn is_gained(&self) -> bool {
        self.previous.is_none() && self.selection.is_some()
    }

    /// Returns true if the surface no longer has a selection.
    pub fn is_lost(&self) -> bool {
        self.previous.is_some() && self.selection.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kinds() {
        assert!(Signal::KeyDown.kinds().is_empty());
        assert_eq!(Signal::Blur.kinds(), KindFlags::SELECTION);
        assert_eq!(Signal::Paste.kinds(), KindFlags::ALL);
        assert_eq!(Signal::Poll.kinds(), KindFlags::FIELD | KindFlags::SELECTION);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NotificationKind::FieldChange.name(), "field:change");
        assert_eq!(NotificationKind::SelectionChange.to_string(), "selection:change");
        assert_eq!(KindFlags::from(NotificationKind::SelectionChange), KindFlags::SELECTION);
    }

    #[test]
    fn test_selection_change_transitions() {
        let caret = Some(Selection::caret(3.into()));

        let gained = SelectionChange { previous: None, selection: caret };
        assert!(gained.is_gained());
        assert!(!gained.is_lost());

        let lost = SelectionChange { previous: caret, selection: None };
        assert!(lost.is_lost());
        assert!(!lost.is_gained());
    }

    #[test]
    fn test_kind_flags_serde() {
        let flags: KindFlags = serde_json::from_str("\"FIELD\"").unwrap();
        assert_eq!(flags, KindFlags::FIELD);

        let signal: Signal = serde_json::from_str("\"MouseUp\"").unwrap();
        assert_eq!(signal, Signal::MouseUp);
    }
}
