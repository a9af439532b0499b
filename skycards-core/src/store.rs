//! Centralized state store with an effect-emitting reducer
//!
//! The reducer is a plain function: it mutates state and returns what
//! changed plus a list of effects (declarative descriptions of side work such
//! as "fetch this location"). The runtime executes the effects; the reducer
//! never does I/O.
//!
//! # Example
//!
//! ```
//! use skycards_core::action::Action;
//! use skycards_core::store::{DispatchResult, Store};
//!
//! #[derive(Clone, Debug)]
//! enum Msg { Add(u32) }
//!
//! impl Action for Msg {
//!     fn name(&self) -> &'static str { "Add" }
//! }
//!
//! fn reducer(total: &mut u32, msg: Msg) -> DispatchResult<String> {
//!     let Msg::Add(n) = msg;
//!     *total += n;
//!     DispatchResult::changed_with(format!("total is {}", total))
//! }
//!
//! let mut store = Store::new(0, reducer);
//! let result = store.dispatch(Msg::Add(2));
//! assert!(result.changed);
//! assert_eq!(*store.state(), 2);
//! assert_eq!(result.effects, vec!["total is 2".to_string()]);
//! ```

use std::marker::PhantomData;

use crate::action::{Action, ActionSummary};

/// Outcome of one dispatch: whether to re-render and which effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Append an effect.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Reducer signature used by [`Store`].
pub type Reducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Hooks around every dispatch.
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);
    fn after(&mut self, action: &A, changed: bool, effects: usize);
}

/// Middleware that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _changed: bool, _effects: usize) {}
}

/// Logs every processed action at debug level through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, changed: bool, effects: usize) {
        tracing::debug!(
            action = %action.name(),
            summary = %action.summary(),
            changed,
            effects,
            "Action processed"
        );
    }
}

/// State container: the single writer of application state.
pub struct Store<S, A, E, M = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<A>,
}

impl<S, A: Action, E> Store<S, A, E, NoopMiddleware> {
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, E, M: Middleware<A>> Store<S, A, E, M> {
    pub fn with_middleware(state: S, reducer: Reducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    /// Run the reducer for `action`.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware
            .after(&action, result.changed, result.effects.len());
        result
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
