//! # Change notification
//!
//! ## Overview
//!
//! A [ChangeNotifier] watches a single [Surface] and turns the host's native [signals](Signal)
//! into field change and selection change notifications. Hosts report signals as they arrive,
//! however many of them accompany a single edit; the notifier compares the surface against what it
//! last saw, and only notifies listeners about the parts that actually changed.
//!
//! A notifier starts out detached. [ChangeNotifier::attach] captures the surface's current state
//! without notifying anyone, and [ChangeNotifier::detach] lets go of the surface again.
//!
//! Everything here is meant to run on the host's UI thread. All methods take `&self`, so that
//! listeners holding an [Rc] to the notifier can register, remove or detach while a notification
//! is being delivered. Changes found by an observation that a listener triggers are queued, and
//! delivered once the current notification has reached every listener.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use surfacekit::notifier::ChangeNotifier;
//! use surfacekit::surface::TextSurface;
//! use surfacekit::surface_types::Signal;
//!
//! let surface = TextSurface::new("A").shared();
//! let notifier = ChangeNotifier::<TextSurface>::default();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let s = seen.clone();
//! notifier.on_field_change(move |change| {
//!     s.borrow_mut().push(change.content.clone());
//!     Ok(())
//! });
//! notifier.attach(&surface).unwrap();
//!
//! surface.borrow_mut().insert(1, "B");
//!
//! // Browsers typically report several events for one keystroke.
//! notifier.signal(Signal::Input);
//! notifier.signal(Signal::KeyUp);
//! notifier.signal(Signal::SelectionChange);
//!
//! assert_eq!(*seen.borrow(), vec![String::from("AB")]);
//! ```
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::config::NotifierConfig;
use crate::errors::{AttachError, HandlerError};
use crate::events::{Changes, FieldChange, SelectionChange, Snapshot};
use crate::listener::{invoke, ListenerHandle, ListenerResult, ListenerSet};
use crate::surface::Surface;
use crate::util::IdGenerator;

use surface_types::{KindFlags, NotificationKind, Signal};

enum Phase<S: Surface + ?Sized> {
    Detached,
    Attached { surface: Weak<RefCell<S>>, snapshot: Snapshot },
}

enum Tick {
    Detached,
    Lost,
    Busy,
    Changed(Changes),
}

/// What happened during a single observation of the surface.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Observation {
    /// Whether the content changed and field change listeners were notified.
    pub field_changed: bool,

    /// Whether the selection changed and selection change listeners were notified.
    pub selection_changed: bool,

    /// Listener failures caught while dispatching.
    pub failures: Vec<HandlerError>,
}

impl Observation {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.field_changed && !self.selection_changed
    }

    /// Returns true if a notification of the given kind was dispatched.
    pub fn changed(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::FieldChange => self.field_changed,
            NotificationKind::SelectionChange => self.selection_changed,
        }
    }
}

/// Watches a [Surface] and notifies listeners when its content or selection changes.
pub struct ChangeNotifier<S: Surface + ?Sized = dyn Surface> {
    config: NotifierConfig,
    phase: RefCell<Phase<S>>,

    /// Bumped on every attach and detach, so that a dispatch can tell if it should stop.
    epoch: Cell<u64>,

    /// Set while listeners are running; changes found meanwhile wait in `pending`.
    dispatching: Cell<bool>,
    pending: RefCell<VecDeque<Changes>>,

    ids: RefCell<IdGenerator>,
    field: RefCell<ListenerSet<FieldChange>>,
    selection: RefCell<ListenerSet<SelectionChange>>,
}

/// Marks a notifier as dispatching until dropped, including when a listener panics.
struct DispatchGuard<'a> {
    dispatching: &'a Cell<bool>,
    pending: &'a RefCell<VecDeque<Changes>>,
}

impl<'a> DispatchGuard<'a> {
    fn new<S: Surface + ?Sized>(notifier: &'a ChangeNotifier<S>) -> Self {
        notifier.dispatching.set(true);

        DispatchGuard {
            dispatching: &notifier.dispatching,
            pending: &notifier.pending,
        }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.dispatching.set(false);
        self.pending.borrow_mut().clear();
    }
}

impl<S: Surface + ?Sized> ChangeNotifier<S> {
    /// Create a new, detached notifier.
    pub fn new(config: NotifierConfig) -> Self {
        ChangeNotifier {
            config,
            phase: RefCell::new(Phase::Detached),
            epoch: Cell::new(0),
            dispatching: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
            ids: RefCell::new(IdGenerator::default()),
            field: RefCell::new(ListenerSet::default()),
            selection: RefCell::new(ListenerSet::default()),
        }
    }

    /// The configuration this notifier was created with.
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Returns true if the notifier is currently observing a surface.
    pub fn is_attached(&self) -> bool {
        matches!(*self.phase.borrow(), Phase::Attached { .. })
    }

    /// Start observing `surface`.
    ///
    /// This records the surface's current content and selection as the starting point for later
    /// comparisons. No listeners are notified.
    pub fn attach(&self, surface: &Rc<RefCell<S>>) -> Result<(), AttachError> {
        let mut phase = self.phase.borrow_mut();

        if let Phase::Attached { .. } = *phase {
            return Err(AttachError::AlreadyAttached);
        }

        let snapshot = {
            let locked = surface.try_borrow().map_err(|_| AttachError::Busy)?;

            if !locked.is_available() {
                return Err(AttachError::Unavailable);
            }

            Snapshot::capture(&*locked)
        };

        debug!(
            "attached to surface ({} bytes, selection {:?})",
            snapshot.content.len(),
            snapshot.selection
        );

        *phase = Phase::Attached { surface: Rc::downgrade(surface), snapshot };
        self.epoch.set(self.epoch.get() + 1);

        Ok(())
    }

    /// Stop observing the current surface.
    ///
    /// Once this returns, no further notifications are delivered until the notifier is attached
    /// again, including to listeners that were still waiting in a dispatch in progress. Returns
    /// false if the notifier was already detached.
    pub fn detach(&self) -> bool {
        let prev = std::mem::replace(&mut *self.phase.borrow_mut(), Phase::Detached);

        match prev {
            Phase::Detached => false,
            Phase::Attached { .. } => {
                self.epoch.set(self.epoch.get() + 1);
                self.pending.borrow_mut().clear();
                debug!("detached from surface");
                true
            },
        }
    }

    /// Register a listener for field changes.
    pub fn on_field_change<F>(&self, handler: F) -> ListenerHandle
    where
        F: Fn(&FieldChange) -> ListenerResult + 'static,
    {
        let handle = self.next_handle(NotificationKind::FieldChange);
        self.field.borrow_mut().insert(handle, Rc::new(handler));

        return handle;
    }

    /// Register a listener for selection changes.
    pub fn on_selection_change<F>(&self, handler: F) -> ListenerHandle
    where
        F: Fn(&SelectionChange) -> ListenerResult + 'static,
    {
        let handle = self.next_handle(NotificationKind::SelectionChange);
        self.selection.borrow_mut().insert(handle, Rc::new(handler));

        return handle;
    }

    /// Remove a previously registered listener. Returns false if it was already removed.
    ///
    /// A listener removed while a notification is being delivered still receives that
    /// notification if it hadn't yet.
    pub fn remove(&self, handle: &ListenerHandle) -> bool {
        match handle.kind() {
            NotificationKind::FieldChange => self.field.borrow_mut().remove(handle),
            NotificationKind::SelectionChange => self.selection.borrow_mut().remove(handle),
        }
    }

    /// Remove every listener of the given kind.
    pub fn clear(&self, kind: NotificationKind) {
        match kind {
            NotificationKind::FieldChange => self.field.borrow_mut().clear(),
            NotificationKind::SelectionChange => self.selection.borrow_mut().clear(),
        }
    }

    /// Number of listeners registered for the given kind.
    pub fn listeners(&self, kind: NotificationKind) -> usize {
        match kind {
            NotificationKind::FieldChange => self.field.borrow().len(),
            NotificationKind::SelectionChange => self.selection.borrow().len(),
        }
    }

    /// The content as of the last observation, if attached.
    pub fn last_content(&self) -> Option<String> {
        match &*self.phase.borrow() {
            Phase::Detached => None,
            Phase::Attached { snapshot, .. } => Some(snapshot.content.clone()),
        }
    }

    /// Handle a native signal from the host.
    ///
    /// When [strict_signals](NotifierConfig::strict_signals) is set, only the kinds the signal
    /// can affect are compared.
    pub fn signal(&self, signal: Signal) -> Observation {
        let kinds = if self.config.strict_signals {
            signal.kinds()
        } else {
            KindFlags::ALL
        };

        trace!("signal {:?}", signal);

        self.tick(kinds)
    }

    /// Compare the whole surface against the last observation, regardless of any signal.
    pub fn observe(&self) -> Observation {
        self.tick(KindFlags::ALL)
    }

    fn next_handle(&self, kind: NotificationKind) -> ListenerHandle {
        ListenerHandle::new(kind, self.ids.borrow_mut().next())
    }

    fn tick(&self, kinds: KindFlags) -> Observation {
        let kinds = kinds & self.config.kinds;
        let mut obs = Observation::default();

        if kinds.is_empty() {
            return obs;
        }

        // The snapshot gets updated before any listener runs, so that a listener which causes
        // another observation never sees the same change twice.
        let changes = match self.compare(kinds) {
            Tick::Changed(changes) => changes,
            Tick::Detached => return obs,
            Tick::Busy => {
                debug!("surface is busy; skipping observation");
                return obs;
            },
            Tick::Lost => {
                warn!("surface was dropped while attached; detaching");
                self.detach();
                return obs;
            },
        };

        if changes.is_empty() {
            return obs;
        }

        // A listener caused this observation. Queue its changes behind the ones being delivered,
        // so that every listener sees changes in the order the snapshot went through them.
        if self.dispatching.get() {
            trace!("queueing changes found during dispatch");
            obs.field_changed = changes.field.is_some();
            obs.selection_changed = changes.selection.is_some();
            self.pending.borrow_mut().push_back(changes);
            return obs;
        }

        let _guard = DispatchGuard::new(self);
        let mut next = Some(changes);

        while let Some(changes) = next {
            self.deliver(changes, &mut obs);
            next = self.pending.borrow_mut().pop_front();
        }

        return obs;
    }

    fn deliver(&self, changes: Changes, obs: &mut Observation) {
        let epoch = self.epoch.get();

        if let Some(change) = changes.field {
            obs.field_changed = true;
            self.dispatch(&self.field, &change, epoch, &mut obs.failures);
        }

        if let Some(change) = changes.selection {
            if self.epoch.get() == epoch {
                obs.selection_changed = true;
                self.dispatch(&self.selection, &change, epoch, &mut obs.failures);
            }
        }
    }

    fn compare(&self, kinds: KindFlags) -> Tick {
        let mut phase = self.phase.borrow_mut();

        let Phase::Attached { surface, snapshot } = &mut *phase else {
            return Tick::Detached;
        };

        let Some(surface) = surface.upgrade() else {
            return Tick::Lost;
        };

        let changes = match surface.try_borrow() {
            Ok(locked) => snapshot.update(&*locked, kinds),
            Err(_) => return Tick::Busy,
        };

        Tick::Changed(changes)
    }

    fn dispatch<T>(
        &self,
        set: &RefCell<ListenerSet<T>>,
        payload: &T,
        epoch: u64,
        failures: &mut Vec<HandlerError>,
    ) {
        let listeners = set.borrow().snapshot();

        for (handle, handler) in listeners.iter() {
            if self.epoch.get() != epoch {
                trace!("detached during dispatch; skipping remaining listeners");
                break;
            }

            trace!("dispatching to {}", handle);

            if let Err(e) = invoke(*handle, handler, payload, self.config.catch_panics) {
                warn!("{}", e);
                failures.push(e);
            }
        }
    }
}

impl<S: Surface + ?Sized> Default for ChangeNotifier<S> {
    fn default() -> Self {
        ChangeNotifier::new(NotifierConfig::default())
    }
}
