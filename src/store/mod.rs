//! Unidirectional state container.
//!
//! A [`Store`] holds one state value and replaces it wholesale on every
//! dispatched action. Observers register explicitly and stay registered until
//! their [`Subscription`] guard is dropped.

use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Pure transition function for a [`Store`].
pub trait Reducer {
    type State;
    type Action;

    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;
}

/// The read/dispatch/subscribe surface consumers depend on.
pub trait StateContainer {
    type State;
    type Action;

    fn state(&self) -> &Self::State;

    fn dispatch(&mut self, action: Self::Action);

    fn subscribe<F>(&self, observer: F) -> Subscription<Self::State>
    where
        F: FnMut(&Self::State) + Send + 'static;
}

type Observer<S> = Box<dyn FnMut(&S) + Send>;

struct Observers<S> {
    next_id: u64,
    entries: Vec<(u64, Observer<S>)>,
}

impl<S> Observers<S> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// Registration handle returned by [`StateContainer::subscribe`].
///
/// Dropping it removes the observer; a store that is already gone is ignored.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<S> {
    id: u64,
    registry: Weak<Mutex<Observers<S>>>,
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut observers = registry.lock().unwrap_or_else(PoisonError::into_inner);
            observers.entries.retain(|(id, _)| *id != self.id);
            log::debug!("observer {} unsubscribed", self.id);
        }
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

pub struct Store<R: Reducer> {
    state: R::State,
    observers: Arc<Mutex<Observers<R::State>>>,
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            state: initial,
            observers: Arc::new(Mutex::new(Observers::new())),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

impl<R> Default for Store<R>
where
    R: Reducer,
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R> StateContainer for Store<R>
where
    R: Reducer,
    R::State: 'static,
{
    type State = R::State;
    type Action = R::Action;

    fn state(&self) -> &R::State {
        &self.state
    }

    fn dispatch(&mut self, action: R::Action) {
        self.state = R::reduce(&self.state, action);

        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, observer) in observers.entries.iter_mut() {
            observer(&self.state);
        }
    }

    fn subscribe<F>(&self, observer: F) -> Subscription<R::State>
    where
        F: FnMut(&R::State) + Send + 'static,
    {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = observers.next_id;
        observers.next_id += 1;
        observers.entries.push((id, Box::new(observer)));
        log::debug!("observer {id} subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.observers),
        }
    }
}
