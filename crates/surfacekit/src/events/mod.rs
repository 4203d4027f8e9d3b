//! # Change detection
//!
//! ## Overview
//!
//! A [ChangeNotifier](crate::notifier::ChangeNotifier) keeps a snapshot of the last content and
//! selection it observed on its surface. Each observation compares the surface against that
//! snapshot one field at a time, and writes every field that differs back into the snapshot
//! before anyone is told about it.
//!
//! The comparison for each kind of notification lives in its own module:
//!
//! - [field_change] for content
//! - [selection_change] for the caret and selected range
pub mod field_change;
pub mod selection_change;

pub use surface_types::{FieldChange, SelectionChange};

use crate::surface::Surface;
use surface_types::{selection::Selection, KindFlags};

/// The last observed state of a surface.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub content: String,
    pub selection: Option<Selection>,
}

/// The changes found by a single observation.
#[derive(Debug, Default)]
pub(crate) struct Changes {
    pub field: Option<FieldChange>,
    pub selection: Option<SelectionChange>,
}

impl Snapshot {
    pub fn capture<S: Surface + ?Sized>(surface: &S) -> Self {
        Snapshot {
            content: surface.content().into_owned(),
            selection: surface.selection(),
        }
    }

    /// Compare the surface against this snapshot for each of `kinds`, updating the fields that
    /// changed.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &S, kinds: KindFlags) -> Changes {
        let field = if kinds.contains(KindFlags::FIELD) {
            field_change::detect(&mut self.content, surface.content())
        } else {
            None
        };

        let selection = if kinds.contains(KindFlags::SELECTION) {
            selection_change::detect(&mut self.selection, surface.selection())
        } else {
            None
        };

        Changes { field, selection }
    }
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.field.is_none() && self.selection.is_none()
    }
}
