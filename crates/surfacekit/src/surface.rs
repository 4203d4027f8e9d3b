//! # Editable surfaces
//!
//! ## Overview
//!
//! A [Surface] is the editable region being observed. It is owned by the host, which hands a
//! shared reference to a [ChangeNotifier](crate::notifier::ChangeNotifier); the notifier only
//! keeps a weak reference, and reads the current content and selection whenever it is told that
//! something may have happened.
//!
//! Hosts with their own document model implement [Surface] for it. [TextSurface] is a
//! self-contained implementation backed by a rope, for hosts that just need a plain text field.
//!
//! ## Example
//!
//! ```
//! use surfacekit::surface::{Surface, TextSurface};
//! use surfacekit::surface_types::selection::Selection;
//!
//! let mut field = TextSurface::new("hello");
//! field.focus();
//! field.select(Selection::caret(5.into()));
//! field.type_text(" world");
//!
//! assert_eq!(field.content(), "hello world");
//! assert_eq!(field.selection(), Some(Selection::caret(11.into())));
//! ```
use std::borrow::Cow;
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use ropey::Rope;

use surface_types::selection::{Position, Selection};

/// An editable region that can be observed for changes.
pub trait Surface {
    /// The surface's current content.
    fn content(&self) -> Cow<'_, str>;

    /// The surface's current selection, or `None` if nothing inside it is selected.
    fn selection(&self) -> Option<Selection>;

    /// Whether the surface can currently be observed.
    fn is_available(&self) -> bool {
        true
    }
}

/// Shared reference to a surface, as handed out by its host.
pub type SharedSurface<S = dyn Surface> = Rc<RefCell<S>>;

/// A plain text surface stored in a [Rope].
///
/// All offsets are character offsets, and out-of-range offsets are clamped to the end of the
/// text. Edits keep the stored selection pointing at the same text: positions after an edit
/// shift along with it, and positions inside deleted text move to where the deletion started.
#[derive(Clone, Debug)]
pub struct TextSurface {
    text: Rope,
    selection: Selection,
    focused: bool,
    available: bool,
}

impl TextSurface {
    /// Create a new, unfocused surface with the caret at the start of `text`.
    pub fn new(text: &str) -> Self {
        TextSurface {
            text: Rope::from_str(text),
            selection: Selection::default(),
            focused: false,
            available: true,
        }
    }

    /// Wrap this surface so that it can be shared with a notifier.
    pub fn shared(self) -> SharedSurface<TextSurface> {
        return Rc::new(RefCell::new(self));
    }

    /// Number of characters in the surface.
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    /// Returns true if the surface currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the surface focus, restoring its last selection.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Remove focus from the surface. Its selection is remembered for the next [focus].
    ///
    /// [focus]: TextSurface::focus
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Mark the surface as available or unavailable for observation.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Move the selection. Positions are clamped to the text.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection.map(|pos| self.clamp(pos));
    }

    /// Insert `s` at character offset `at`.
    pub fn insert(&mut self, at: usize, s: &str) {
        let at = at.min(self.len());
        let n = s.chars().count();

        self.text.insert(at, s);
        self.selection = self.selection.map(|pos| {
            if pos.offset >= at {
                Position::from(pos.offset + n)
            } else {
                pos
            }
        });
    }

    /// Delete the characters in `range`.
    pub fn delete(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        if start == end {
            return;
        }

        self.text.remove(start..end);
        self.selection = self.selection.map(|pos| {
            if pos.offset >= end {
                Position::from(pos.offset - (end - start))
            } else if pos.offset > start {
                Position::from(start)
            } else {
                pos
            }
        });
    }

    /// Replace the characters in `range` with `s`.
    pub fn replace(&mut self, range: Range<usize>, s: &str) {
        let start = range.start.min(self.len());

        self.delete(range);
        self.insert(start, s);
    }

    /// Replace the whole content, clamping the selection to the new text.
    pub fn set_content(&mut self, s: &str) {
        self.text = Rope::from_str(s);
        self.selection = self.selection.map(|pos| self.clamp(pos));
    }

    /// Replace the selected text with `s`, and leave the caret after it.
    pub fn type_text(&mut self, s: &str) {
        let start = self.selection.start().offset;
        let end = self.selection.end().offset;

        self.delete(start..end);
        self.text.insert(start, s);

        let caret = Position::from(start + s.chars().count());
        self.selection = Selection::caret(caret);
    }

    fn clamp(&self, pos: Position) -> Position {
        Position::from(pos.offset.min(self.len()))
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        TextSurface::new("")
    }
}

impl Surface for TextSurface {
    fn content(&self) -> Cow<'_, str> {
        match self.text.slice(..).as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(self.text.to_string()),
        }
    }

    fn selection(&self) -> Option<Selection> {
        self.focused.then_some(self.selection)
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(offset: usize) -> Option<Selection> {
        Some(Selection::caret(offset.into()))
    }

    #[test]
    fn test_focus_blur() {
        let mut field = TextSurface::new("abc");
        assert_eq!(field.selection(), None);

        field.focus();
        field.select(Selection::new(1.into(), 2.into()));
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 2.into())));

        field.blur();
        assert_eq!(field.selection(), None);

        field.focus();
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 2.into())));
    }

    #[test]
    fn test_select_clamps() {
        let mut field = TextSurface::new("abc");
        field.focus();

        field.select(Selection::new(Position::new(3, 1), 10.into()));
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 3.into())));
    }

    #[test]
    fn test_insert_adjusts_selection() {
        let mut field = TextSurface::new("hello");
        field.focus();
        field.select(Selection::new(1.into(), 4.into()));

        // Insertion after the selection leaves it alone.
        field.insert(5, "!");
        assert_eq!(field.content(), "hello!");
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 4.into())));

        // Insertion at or before a boundary pushes it along.
        field.insert(1, "ééé");
        assert_eq!(field.content(), "héééello!");
        assert_eq!(field.selection(), Some(Selection::new(4.into(), 7.into())));

        // Out of range offsets append.
        field.insert(100, "?");
        assert_eq!(field.content(), "héééello!?");
    }

    #[test]
    fn test_delete_adjusts_selection() {
        let mut field = TextSurface::new("0123456789");
        field.focus();
        field.select(Selection::new(2.into(), 8.into()));

        field.delete(0..1);
        assert_eq!(field.content(), "123456789");
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 7.into())));

        field.delete(5..20);
        assert_eq!(field.content(), "12345");
        assert_eq!(field.selection(), Some(Selection::new(1.into(), 5.into())));

        // Empty and inverted ranges do nothing.
        field.delete(3..3);
        field.delete(4..2);
        assert_eq!(field.content(), "12345");
    }

    #[test]
    fn test_replace() {
        let mut field = TextSurface::new("one two three");
        field.focus();
        field.select(Selection::caret(13.into()));

        field.replace(4..7, "2");
        assert_eq!(field.content(), "one 2 three");
        assert_eq!(field.selection(), caret(11));
    }

    #[test]
    fn test_set_content() {
        let mut field = TextSurface::new("a long line of text");
        field.focus();
        field.select(Selection::new(2.into(), 15.into()));

        field.set_content("short");
        assert_eq!(field.content(), "short");
        assert_eq!(field.selection(), Some(Selection::new(2.into(), 5.into())));
    }

    #[test]
    fn test_type_text() {
        let mut field = TextSurface::new("A");
        field.focus();
        field.select(Selection::caret(1.into()));

        field.type_text("B");
        assert_eq!(field.content(), "AB");
        assert_eq!(field.selection(), caret(2));

        field.select(Selection::new(2.into(), 0.into()));
        field.type_text("xyz");
        assert_eq!(field.content(), "xyz");
        assert_eq!(field.selection(), caret(3));
    }

    #[test]
    fn test_available() {
        let mut field = TextSurface::default();
        assert!(field.is_available());

        field.set_available(false);
        assert!(!field.is_available());
    }
}
