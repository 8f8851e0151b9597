// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picked-element selection with explicit change subscriptions.
//!
//! The viewer owns the selection; panels subscribe and re-derive their state
//! each time the picked identifier changes. Everything here runs on the UI
//! thread, so subscribers share panels through `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Selection::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(Option<&str>)>;

/// Something that re-derives its state from the picked element.
pub trait SelectionObserver {
    fn on_selection(&mut self, picked: Option<&str>);
}

/// The currently picked element and its subscribers.
#[derive(Default)]
pub struct Selection {
    current: Option<String>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Register a callback invoked on every change of the picked element.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(Option<&str>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Subscribe an observer and bring it up to date with the current pick.
    pub fn bind<T>(&mut self, observer: Rc<RefCell<T>>) -> SubscriptionId
    where
        T: SelectionObserver + 'static,
    {
        observer.borrow_mut().on_selection(self.current());
        self.subscribe(move |picked| observer.borrow_mut().on_selection(picked))
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Update the picked element. An empty identifier means nothing is picked.
    ///
    /// Subscribers are notified only when the value changes. Returns whether
    /// it changed.
    pub fn set(&mut self, picked: Option<String>) -> bool {
        let picked = picked.filter(|p| !p.is_empty());
        if picked == self.current {
            return false;
        }
        tracing::debug!(picked = ?picked, "Selection changed");
        self.current = picked;
        let current = self.current.as_deref();
        for (_, callback) in &mut self.subscribers {
            callback(current);
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
