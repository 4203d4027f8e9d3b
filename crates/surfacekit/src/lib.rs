//! # surfacekit
//!
//! ## Overview
//!
//! This crate helps WYSIWYG editors keep track of what happens to their editable surfaces.
//!
//! Hosts like browsers report edits and caret movement through a variety of native events, which
//! fire unreliably, repeatedly, and in host-specific orders. A [ChangeNotifier] sits between those
//! events and the rest of an editor (its toolbar, its undo history, its autosave), and turns them
//! into exactly one notification per real change:
//!
//! - [FieldChange], when the content of the surface changed
//! - [SelectionChange], when the caret or the selected range moved
//!
//! The [registry] module routes signals for pages with several surfaces, and the [surface] module
//! contains the [Surface] trait along with a ready-made plain text implementation.
//!
//! ## Example
//!
//! ```
//! use surfacekit::{ChangeNotifier, Signal, TextSurface};
//! use surfacekit::surface_types::selection::Selection;
//!
//! let surface = TextSurface::new("Hello").shared();
//! let notifier = ChangeNotifier::<TextSurface>::default();
//!
//! notifier.on_selection_change(|change| {
//!     assert_eq!(change.selection, Some(Selection::caret(5.into())));
//!     Ok(())
//! });
//! notifier.attach(&surface).unwrap();
//!
//! surface.borrow_mut().focus();
//! surface.borrow_mut().select(Selection::caret(5.into()));
//!
//! let obs = notifier.signal(Signal::MouseUp);
//! assert!(obs.selection_changed);
//! assert!(obs.failures.is_empty());
//! ```
//!
//! [FieldChange]: surface_types::FieldChange
//! [SelectionChange]: surface_types::SelectionChange

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::needless_return)]
#![allow(clippy::type_complexity)]

mod util;

pub mod config;
pub mod errors;
pub mod events;
pub mod listener;
pub mod notifier;
pub mod registry;
pub mod surface;

pub use surface_types;

pub use self::config::NotifierConfig;
pub use self::errors::{AttachError, HandlerError, ListenerError};
pub use self::listener::{ListenerHandle, ListenerResult};
pub use self::notifier::{ChangeNotifier, Observation};
pub use self::registry::Registry;
pub use self::surface::{SharedSurface, Surface, TextSurface};
pub use surface_types::{FieldChange, KindFlags, NotificationKind, SelectionChange, Signal};
