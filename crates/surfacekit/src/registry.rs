//! # Surface registry
//!
//! ## Overview
//!
//! A host page usually contains several editable surfaces, while its native signals arrive
//! tagged with whichever surface they target. A [Registry] owns one [ChangeNotifier] per surface
//! identifier, and routes each signal to the right one.
//!
//! The registry is an ordinary value: build one when the host starts up, with the
//! [NotifierConfig] every notifier should use, and pass it to whatever needs it.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use surfacekit::config::NotifierConfig;
//! use surfacekit::registry::Registry;
//! use surfacekit::surface::TextSurface;
//! use surfacekit::surface_types::Signal;
//!
//! let mut registry = Registry::new(NotifierConfig::default());
//! let title = TextSurface::new("Title").shared();
//! let body = TextSurface::new("Body").shared();
//! let changes = Rc::new(Cell::new(0));
//!
//! let c = changes.clone();
//! registry.attach("title", &title).unwrap().on_field_change(move |_| {
//!     c.set(c.get() + 1);
//!     Ok(())
//! });
//! registry.attach("body", &body).unwrap();
//!
//! body.borrow_mut().insert(4, "!");
//! title.borrow_mut().insert(5, "!");
//!
//! assert!(registry.signal(&"body", Signal::Input).unwrap().field_changed);
//! assert_eq!(changes.get(), 0);
//!
//! assert!(registry.signal(&"title", Signal::Input).unwrap().field_changed);
//! assert_eq!(changes.get(), 1);
//! ```
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use log::debug;

use crate::config::NotifierConfig;
use crate::errors::AttachError;
use crate::notifier::{ChangeNotifier, Observation};
use crate::surface::{SharedSurface, Surface};

use surface_types::Signal;

/// Tracks the notifiers for a set of surfaces.
pub struct Registry<K> {
    config: NotifierConfig,
    notifiers: HashMap<K, Rc<ChangeNotifier>>,
}

impl<K> Registry<K>
where
    K: Clone + Debug + Eq + Hash,
{
    /// Create a new registry whose notifiers use `config`.
    pub fn new(config: NotifierConfig) -> Self {
        Registry { config, notifiers: HashMap::new() }
    }

    /// Get the notifier for `id`, creating a detached one if there isn't one yet.
    ///
    /// This allows listeners to be registered before the surface exists.
    pub fn notifier(&mut self, id: K) -> Rc<ChangeNotifier> {
        self.notifiers
            .entry(id)
            .or_insert_with(|| Rc::new(ChangeNotifier::new(self.config.clone())))
            .clone()
    }

    /// Start observing `surface` under `id`, and return its notifier.
    pub fn attach<T>(
        &mut self,
        id: K,
        surface: &Rc<RefCell<T>>,
    ) -> Result<Rc<ChangeNotifier>, AttachError>
    where
        T: Surface + 'static,
    {
        let surface: SharedSurface = surface.clone();

        self.attach_shared(id, &surface)
    }

    /// Start observing a surface that the host already shares as a [SharedSurface].
    ///
    /// If attaching fails, a notifier is only left behind for `id` if one was already there.
    pub fn attach_shared(
        &mut self,
        id: K,
        surface: &SharedSurface,
    ) -> Result<Rc<ChangeNotifier>, AttachError> {
        let notifier = match self.notifiers.get(&id) {
            Some(notifier) => {
                notifier.attach(surface)?;
                notifier.clone()
            },
            None => {
                let notifier = Rc::new(ChangeNotifier::new(self.config.clone()));
                notifier.attach(surface)?;
                self.notifiers.insert(id.clone(), notifier.clone());
                notifier
            },
        };

        debug!("registered surface {:?}", id);

        Ok(notifier)
    }

    /// Stop observing the surface under `id`, keeping its listeners for when it is attached
    /// again. Returns false if it wasn't attached.
    pub fn detach(&self, id: &K) -> bool {
        self.notifiers.get(id).map(|n| n.detach()).unwrap_or(false)
    }

    /// Detach the surface under `id`, and drop its notifier along with its listeners.
    pub fn remove(&mut self, id: &K) -> Option<Rc<ChangeNotifier>> {
        let notifier = self.notifiers.remove(id)?;
        notifier.detach();
        debug!("removed surface {:?}", id);

        Some(notifier)
    }

    /// Get the notifier for `id`, if there is one.
    pub fn get(&self, id: &K) -> Option<Rc<ChangeNotifier>> {
        self.notifiers.get(id).cloned()
    }

    /// Deliver a native signal to the surface it targets.
    ///
    /// Returns `None` if nothing is registered under `id`.
    pub fn signal(&self, id: &K, signal: Signal) -> Option<Observation> {
        let notifier = self.get(id)?;

        Some(notifier.signal(signal))
    }

    /// Deliver a native signal to every attached surface.
    pub fn broadcast(&self, signal: Signal) -> Vec<(K, Observation)> {
        let attached = self
            .notifiers
            .iter()
            .filter(|(_, n)| n.is_attached())
            .map(|(id, n)| (id.clone(), n.clone()))
            .collect::<Vec<_>>();

        attached.into_iter().map(|(id, n)| (id, n.signal(signal))).collect()
    }

    /// The identifiers of every registered notifier.
    pub fn ids(&self) -> Vec<K> {
        self.notifiers.keys().cloned().collect()
    }

    /// Number of registered notifiers, attached or not.
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Number of notifiers currently observing a surface.
    pub fn attached(&self) -> usize {
        self.notifiers.values().filter(|n| n.is_attached()).count()
    }
}

impl<K> Default for Registry<K>
where
    K: Clone + Debug + Eq + Hash,
{
    fn default() -> Self {
        Registry::new(NotifierConfig::default())
    }
}
