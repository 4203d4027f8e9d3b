//! # Field changes
//!
//! ## Overview
//!
//! A field change is reported once for every time the content read from a surface differs from
//! the content last observed. Bursts of host signals that all see the same content collapse into
//! the single notification produced by the first of them.
use std::borrow::Cow;
use std::mem;

use surface_types::FieldChange;

/// Compare `current` against the last observed content, and record it if it differs.
pub(crate) fn detect(last: &mut String, current: Cow<'_, str>) -> Option<FieldChange> {
    if last.as_str() == current.as_ref() {
        return None;
    }

    let content = current.into_owned();
    let previous = mem::replace(last, content.clone());

    Some(FieldChange { previous, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let mut last = String::from("A");

        assert_eq!(detect(&mut last, Cow::Borrowed("A")), None);
        assert_eq!(last, "A");

        let change = detect(&mut last, Cow::Borrowed("AB")).unwrap();
        assert_eq!(change.previous, "A");
        assert_eq!(change.content, "AB");
        assert_eq!(last, "AB");

        // Seeing the same content again reports nothing.
        assert_eq!(detect(&mut last, Cow::Owned("AB".into())), None);
    }

    #[test]
    fn test_detect_revert() {
        let mut last = String::from("A");

        assert!(detect(&mut last, Cow::Borrowed("AB")).is_some());
        let change = detect(&mut last, Cow::Borrowed("A")).unwrap();
        assert_eq!(change.previous, "AB");
        assert_eq!(change.content, "A");
    }
}
