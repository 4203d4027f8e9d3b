//! # Selection changes
//!
//! ## Overview
//!
//! A selection change is reported whenever the caret or selected range read from a surface
//! differs from the last observed one. Gaining or losing a selection entirely (for example, when
//! the surface is focused or blurred) counts as a change. The direction of a selection is part of
//! its state, so reversing a selection without changing the selected text is reported too.
use surface_types::{selection::Selection, SelectionChange};

/// Compare `current` against the last observed selection, and record it if it differs.
pub(crate) fn detect(
    last: &mut Option<Selection>,
    current: Option<Selection>,
) -> Option<SelectionChange> {
    if *last == current {
        return None;
    }

    let previous = std::mem::replace(last, current);

    Some(SelectionChange { previous, selection: current })
}
