//! Change notification for rendering adapters.
//!
//! Listeners receive only the id of a surface that changed and pull fresh
//! state themselves. Everything here is single-threaded.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(&str)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Surface(String),
    All,
}

impl Target {
    fn matches(&self, surface_id: &str) -> bool {
        match self {
            Target::Surface(id) => id == surface_id,
            Target::All => true,
        }
    }
}

struct Entry {
    id: u64,
    target: Target,
    listener: Listener,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Registry of per-surface and global listeners.
#[derive(Default)]
pub struct SubscriptionHub {
    state: Rc<RefCell<HubState>>,
}

impl std::fmt::Debug for SubscriptionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl SubscriptionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for changes to one surface.
    pub fn subscribe(
        &self,
        surface_id: impl Into<String>,
        listener: impl FnMut(&str) + 'static,
    ) -> Subscription {
        self.add(Target::Surface(surface_id.into()), Rc::new(RefCell::new(listener)))
    }

    /// Listen for changes to every surface, including ones created later.
    pub fn subscribe_all(&self, listener: impl FnMut(&str) + 'static) -> Subscription {
        self.add(Target::All, Rc::new(RefCell::new(listener)))
    }

    fn add(&self, target: Target, listener: Listener) -> Subscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.entries.push(Entry {
            id,
            target,
            listener,
        });
        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Notify listeners of a single surface.
    pub fn notify(&self, surface_id: &str) {
        self.notify_batch(&[surface_id.to_string()]);
    }

    /// Notify listeners for each surface in order.
    ///
    /// The listener list is captured once up front, so subscriptions added or
    /// removed by a listener apply to the next call.
    pub fn notify_batch(&self, surface_ids: &[String]) {
        if surface_ids.is_empty() {
            return;
        }
        let snapshot: Vec<(Target, Listener)> = self
            .state
            .borrow()
            .entries
            .iter()
            .map(|e| (e.target.clone(), Rc::clone(&e.listener)))
            .collect();

        for surface_id in surface_ids {
            for (target, listener) in &snapshot {
                if !target.matches(surface_id) {
                    continue;
                }
                // A listener that is already running (re-entrant notify) is skipped.
                match listener.try_borrow_mut() {
                    Ok(mut callback) => (&mut *callback)(surface_id),
                    Err(_) => log::warn!("[A2UI] skipping re-entrant listener for `{}`", surface_id),
                }
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

/// Handle returned by `subscribe`. Dropping it keeps the listener registered;
/// call [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    state: Weak<RefCell<HubState>>,
}

impl Subscription {
    /// Remove the listener. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let mut state = state.borrow_mut();
        let before = state.entries.len();
        state.entries.retain(|e| e.id != self.id);
        state.entries.len() != before
    }

    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().entries.iter().any(|e| e.id == self.id))
    }
}
