//! # Listeners
//!
//! ## Overview
//!
//! Listeners are callbacks registered for a single [NotificationKind]. Registering one returns a
//! [ListenerHandle], which can later be given back to the notifier to remove it.
//!
//! Listeners run in the order they were registered. Dispatch works from a copy of the listener
//! list taken when it starts, so listeners that are added or removed while a notification is
//! being delivered only see the effect from the next notification onwards.
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use crate::errors::{HandlerError, ListenerError};
use crate::util::panic_message;
use surface_types::NotificationKind;

/// What a listener returns after handling a notification.
pub type ListenerResult = Result<(), ListenerError>;

pub(crate) type Handler<T> = Rc<dyn Fn(&T) -> ListenerResult>;

/// Identifies a registered listener.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerHandle {
    kind: NotificationKind,
    id: u64,
}

impl ListenerHandle {
    pub(crate) fn new(kind: NotificationKind, id: u64) -> Self {
        ListenerHandle { kind, id }
    }

    /// The kind of notification this listener receives.
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

pub(crate) struct ListenerSet<T> {
    listeners: Vec<(ListenerHandle, Handler<T>)>,
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        ListenerSet { listeners: Vec::new() }
    }
}

impl<T> ListenerSet<T> {
    pub fn insert(&mut self, handle: ListenerHandle, handler: Handler<T>) {
        self.listeners.push((handle, handler));
    }

    pub fn remove(&mut self, handle: &ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| h != handle);

        return self.listeners.len() != before;
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Copy the current listeners so that they can be run while the set gets modified.
    pub fn snapshot(&self) -> Vec<(ListenerHandle, Handler<T>)> {
        self.listeners.clone()
    }
}

/// Run a single listener, converting its failures into a [HandlerError].
pub(crate) fn invoke<T>(
    handle: ListenerHandle,
    handler: &Handler<T>,
    payload: &T,
    catch_panics: bool,
) -> Result<(), HandlerError> {
    let res = if catch_panics {
        catch_unwind(AssertUnwindSafe(|| handler(payload)))
            .map_err(|e| HandlerError::Panicked(handle, panic_message(e.as_ref())))?
    } else {
        handler(payload)
    };

    res.map_err(|e| HandlerError::Failed(handle, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn handler<F>(f: F) -> Handler<u32>
    where
        F: Fn(&u32) -> ListenerResult + 'static,
    {
        Rc::new(f)
    }

    #[test]
    fn test_insert_remove() {
        let mut set = ListenerSet::<u32>::default();
        let a = ListenerHandle::new(NotificationKind::FieldChange, 0);
        let b = ListenerHandle::new(NotificationKind::FieldChange, 1);

        set.insert(a, handler(|_| Ok(())));
        set.insert(b, handler(|_| Ok(())));
        assert_eq!(set.len(), 2);

        assert_eq!(set.remove(&a), true);
        assert_eq!(set.remove(&a), false);
        assert_eq!(set.len(), 1);

        let snap = set.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].0, b);

        set.clear();
        assert_eq!(set.len(), 0);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_invoke() {
        let handle = ListenerHandle::new(NotificationKind::SelectionChange, 4);
        let seen = Rc::new(Cell::new(0));

        let s = seen.clone();
        let ok = handler(move |v| {
            s.set(*v);
            Ok(())
        });
        assert_eq!(invoke(handle, &ok, &7, true), Ok(()));
        assert_eq!(seen.get(), 7);

        let failing = handler(|_| Err("no thanks".into()));
        assert_eq!(
            invoke(handle, &failing, &7, true),
            Err(HandlerError::Failed(handle, ListenerError::new("no thanks")))
        );

        let panicking = handler(|_| panic!("listener blew up"));
        assert_eq!(
            invoke(handle, &panicking, &7, true),
            Err(HandlerError::Panicked(handle, "listener blew up".into()))
        );
    }

    #[test]
    fn test_handle_display() {
        let handle = ListenerHandle::new(NotificationKind::FieldChange, 12);

        assert_eq!(handle.to_string(), "field:change#12");
        assert_eq!(handle.kind(), NotificationKind::FieldChange);
    }
}
