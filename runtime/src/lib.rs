//! # Cinema Runtime
//!
//! Store runtime for the cinema reservation system.
//!
//! The [`Store`](store::Store) owns the state behind a single mutex and runs
//! every action through the reducer while holding it, so concurrent callers
//! are serialized and a seat can never be sold twice. Events emitted by the
//! reducer are returned to the caller and appended to a bounded journal.
//!
//! ## Example
//!
//! ```
//! use cinema_core::environment::SystemClock;
//! use cinema_core::{FareType, TheaterAction, TheaterEnvironment, TheaterReducer, TheaterState};
//! use cinema_runtime::Store;
//! use std::sync::Arc;
//!
//! let store = Store::new(
//!     TheaterState::new(),
//!     TheaterReducer::new(),
//!     TheaterEnvironment::new(Arc::new(SystemClock)),
//! );
//!
//! let events = store.send(TheaterAction::ReserveSeat {
//!     row: 'C',
//!     column: 5,
//!     fare: FareType::Full,
//! })?;
//! assert!(matches!(events[0], TheaterAction::SeatReserved(_)));
//!
//! let occupied = store.state(|s| s.ledger().total_clients())?;
//! assert_eq!(occupied, 1);
//! # Ok::<(), cinema_runtime::StoreError>(())
//! ```

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StoreError {
        /// A thread panicked while holding the state lock
        ///
        /// The state may be half-updated, so the store refuses further
        /// access instead of exposing it.
        #[error("Store state lock poisoned by a panicked thread")]
        Poisoned,
    }
}

/// Configuration for the Store runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of journal entries kept; 0 disables the journal
    pub journal_capacity: usize,
}

impl StoreConfig {
    /// Default journal capacity
    pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(journal_capacity: usize) -> Self {
        Self { journal_capacity }
    }

    /// Set the journal capacity
    #[must_use]
    pub const fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_JOURNAL_CAPACITY)
    }
}

/// An event recorded in the store journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry<A> {
    /// Position in the journal, starting at 1 and never reused
    pub sequence: u64,

    /// The emitted event
    pub action: A,
}

/// Store module - The runtime for reducers
pub mod store {
    use super::error::StoreError;
    use super::{JournalEntry, StoreConfig};
    use cinema_core::reducer::Reducer;
    use smallvec::SmallVec;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    /// State and journal, guarded together so the journal order matches the
    /// order in which actions were applied.
    #[derive(Debug)]
    struct Guarded<S, A> {
        state: S,
        journal: VecDeque<JournalEntry<A>>,
        next_sequence: u64,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind a `Mutex` so every action is applied atomically)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. A bounded journal of emitted events
    ///
    /// Cloning a Store is cheap and every clone shares the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        guarded: Arc<Mutex<Guarded<S, A>>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                guarded: Arc::clone(&self.guarded),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses the default [`StoreConfig`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                guarded: Arc::new(Mutex::new(Guarded {
                    state: initial_state,
                    journal: VecDeque::with_capacity(config.journal_capacity),
                    next_sequence: 1,
                })),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
            }
        }

        /// Returns the store configuration
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Returns the injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        fn lock(&self) -> Result<MutexGuard<'_, Guarded<S, A>>, StoreError> {
            self.guarded.lock().map_err(|_| {
                tracing::error!("Store lock poisoned");
                StoreError::Poisoned
            })
        }

        /// Send an action to the store
        ///
        /// The reducer runs while the state lock is held. Emitted events are
        /// journaled and returned.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Poisoned`] if a previous holder of the lock
        /// panicked.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&self, action: A) -> Result<SmallVec<[A; 4]>, StoreError> {
            tracing::debug!("Processing action");

            let mut guarded = self.lock()?;
            let guarded = &mut *guarded;

            let events = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer
                    .reduce(&mut guarded.state, action, &self.environment)
            };
            tracing::trace!("Reducer completed, returned {} events", events.len());

            if self.config.journal_capacity > 0 {
                for event in &events {
                    if guarded.journal.len() >= self.config.journal_capacity {
                        guarded.journal.pop_front();
                        tracing::trace!(
                            capacity = self.config.journal_capacity,
                            "Journal at capacity, dropping oldest entry"
                        );
                    }
                    guarded.journal.push_back(JournalEntry {
                        sequence: guarded.next_sequence,
                        action: event.clone(),
                    });
                    guarded.next_sequence += 1;
                }
            }

            Ok(events)
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let occupied = store.state(|s| s.ledger().total_clients())?;
        /// ```
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Poisoned`] if a previous holder of the lock
        /// panicked.
        pub fn state<F, T>(&self, f: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            let guarded = self.lock()?;
            Ok(f(&guarded.state))
        }

        /// Snapshot of the journal, oldest entry first
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Poisoned`] if a previous holder of the lock
        /// panicked.
        pub fn journal(&self) -> Result<Vec<JournalEntry<A>>, StoreError> {
            let guarded = self.lock()?;
            Ok(guarded.journal.iter().cloned().collect())
        }
    }
}

pub use error::StoreError;
pub use store::Store;
